//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `tokio_util` types in any signature
//! - No process or platform details (adapters live in `gecko-nvidia`,
//!   `gecko-download`, and `gecko-cli`)
//! - All traits are object-safe and `Send + Sync` so they can be shared as
//!   `Arc<dyn Port>`

pub mod download_engine;
pub mod driver_catalog;
pub mod notifications;
pub mod system_info;

pub use download_engine::{DownloadEnginePort, ProgressSink};
pub use driver_catalog::{CatalogError, CatalogResult, DriverCatalogPort};
pub use notifications::{LauncherPort, NotificationPresenterPort, UrlOpenerPort};
pub use system_info::{SystemInfoError, SystemInfoPort};
