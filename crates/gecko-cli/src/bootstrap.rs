//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - System probe (nvidia-smi and host OS, with command-line overrides)
//! - NVIDIA catalog client (via gecko-nvidia)
//! - Download engine (via gecko-download)
//! - Console presenter and platform opener
//!
//! Command handlers receive the composed [`CliContext`] and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use gecko_core::{
    ActionRegistry, DownloadEnginePort, DriverCatalogPort, LauncherPort,
    NotificationPresenterPort, Settings, SystemInfoPort, UpdateFlow, UpdateFlowDeps,
    UpdateResolver, UrlOpenerPort, default_download_dir, ensure_directory, validate_settings,
};
use gecko_download::DownloadEngine;
use gecko_nvidia::{DefaultNvidiaClient, NvidiaClientConfig};

use crate::config_file::LoadedSettings;
use crate::error::CliError;
use crate::opener::SystemOpener;
use crate::presenter::ConsolePresenter;
use crate::system_probe::{HostSystemProbe, ProbeOverrides};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// `--download-dir`, taking precedence over the settings file.
    pub download_dir: Option<PathBuf>,
    /// Answer every prompt with its primary button.
    pub auto_accept: bool,
    pub overrides: ProbeOverrides,
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Effective settings after command-line overrides.
    pub settings: Settings,
    /// Where the settings were loaded from.
    pub settings_path: PathBuf,
    pub resolver: Arc<UpdateResolver>,
    pub engine: Arc<dyn DownloadEnginePort>,
    pub flow: UpdateFlow,
}

impl CliContext {
    /// Directory installers are saved into.
    pub fn download_dir(&self) -> Option<&PathBuf> {
        self.settings.download_dir.as_ref()
    }
}

/// Bootstrap the CLI application.
///
/// Resolves the download directory (flag, then settings, then the platform
/// default) and creates it, then builds the services.
pub fn bootstrap(config: CliConfig, loaded: LoadedSettings) -> Result<CliContext> {
    let LoadedSettings {
        mut settings,
        path: settings_path,
        ..
    } = loaded;

    let download_dir = match config.download_dir.or_else(|| settings.download_dir.clone()) {
        Some(dir) => dir,
        None => default_download_dir().map_err(CliError::from)?,
    };
    settings.download_dir = Some(download_dir.clone());
    validate_settings(&settings).map_err(CliError::from)?;
    ensure_directory(&download_dir).map_err(CliError::from)?;

    let system: Arc<dyn SystemInfoPort> = Arc::new(HostSystemProbe::new(config.overrides));
    let catalog: Arc<dyn DriverCatalogPort> =
        Arc::new(DefaultNvidiaClient::new(&NvidiaClientConfig::default()).map_err(CliError::from)?);
    let resolver = Arc::new(UpdateResolver::new(system, catalog));

    let engine: Arc<dyn DownloadEnginePort> =
        Arc::new(DownloadEngine::new().map_err(CliError::from)?);
    let actions = Arc::new(ActionRegistry::new());
    let presenter: Arc<dyn NotificationPresenterPort> =
        Arc::new(ConsolePresenter::new(Arc::clone(&actions), config.auto_accept));
    let opener = Arc::new(SystemOpener::new());

    let flow = UpdateFlow::new(UpdateFlowDeps {
        resolver: Arc::clone(&resolver),
        engine: Arc::clone(&engine),
        presenter,
        actions,
        opener: Arc::clone(&opener) as Arc<dyn UrlOpenerPort>,
        launcher: opener as Arc<dyn LauncherPort>,
        download_dir,
    });

    tracing::debug!(
        target: "gecko.cli",
        settings = %settings_path.display(),
        download_dir = ?settings.download_dir,
        "Bootstrapped CLI context"
    );

    Ok(CliContext {
        settings,
        settings_path,
        resolver,
        engine,
        flow,
    })
}
