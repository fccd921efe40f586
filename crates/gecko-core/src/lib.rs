//! Core domain types and port definitions for gecko.
//!
//! This crate is pure: it owns the driver/version model, the port traits that
//! adapters implement (system probing, the NVIDIA catalog, the download engine,
//! notification presentation), and the two orchestration services built on
//! top of those ports:
//!
//! - [`services::UpdateResolver`] - decides whether a newer driver exists
//! - [`services::UpdateFlow`] - drives notifications, downloads, and actions
//!
//! No HTTP or platform code lives here; adapters are injected at the
//! composition root (`gecko-cli`).

pub mod actions;
pub mod domain;
pub mod download;
pub mod notifications;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use actions::{ActionHandler, ActionRegistry};
pub use domain::{
    DriverDownload, GpuInfo, OsInfo, Version, VersionError, file_name_from_url,
};
pub use download::{DownloadError, DownloadResult, DownloadSnapshot, TransferId, TransferRequest};
pub use notifications::{
    ActionButton, ActionStyle, Notification, NotificationId, NotificationKind, ProgressData,
    ProgressTracker, format_bytes,
};
pub use ports::{
    CatalogError, CatalogResult, DownloadEnginePort, DriverCatalogPort, LauncherPort,
    NotificationPresenterPort, ProgressSink, SystemInfoError, SystemInfoPort, UrlOpenerPort,
};
pub use services::{
    FlowOutcome, ResolutionError, SkipReason, UpdateCheck, UpdateFlow, UpdateFlowDeps,
    UpdateResolver,
};
pub use settings::{LogLevel, Settings, SettingsError, validate_settings};

pub use paths::{PathError, config_file_path, data_root, default_download_dir, ensure_directory};
