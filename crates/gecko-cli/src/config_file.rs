//! Loading and persisting the settings file.
//!
//! Runs before logging is initialised (the file decides the log level), so
//! nothing here logs. What happened is returned as a [`SettingsSource`] and
//! reported by the caller once the subscriber is up.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gecko_core::{Settings, ensure_directory};

use crate::error::CliError;

/// How the effective settings were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// The file was complete and valid.
    Loaded,
    /// No file existed; defaults were written.
    Created,
    /// The file lacked some fields; the completed settings were written back.
    Repaired,
    /// The file could not be parsed; defaults are in effect and the file was
    /// left untouched.
    Defaulted { reason: String },
}

/// Settings together with where they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub source: SettingsSource,
}

impl LoadedSettings {
    /// Log how the settings were obtained.
    pub fn report(&self) {
        let path = self.path.display();
        match &self.source {
            SettingsSource::Loaded => {
                tracing::debug!(target: "gecko.cli", %path, "Loaded settings");
            }
            SettingsSource::Created => {
                tracing::info!(target: "gecko.cli", %path, "Wrote default settings");
            }
            SettingsSource::Repaired => {
                tracing::info!(
                    target: "gecko.cli",
                    %path,
                    "Settings file was incomplete; wrote missing fields"
                );
            }
            SettingsSource::Defaulted { reason } => {
                tracing::warn!(
                    target: "gecko.cli",
                    %path,
                    %reason,
                    "Ignoring unreadable settings file; using defaults"
                );
            }
        }
    }
}

/// Load the settings at `path`, creating or completing the file as needed.
///
/// Out-of-range values are clamped in the returned settings but not written
/// back unless the file also had missing fields.
pub fn load_or_init(path: &Path) -> Result<LoadedSettings, CliError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let settings = Settings::default();
            write_settings(path, &settings)?;
            return Ok(LoadedSettings {
                settings,
                path: path.to_path_buf(),
                source: SettingsSource::Created,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let (settings, source) = match Settings::from_json(&contents) {
        Ok((settings, false)) => (settings, SettingsSource::Loaded),
        Ok((settings, true)) => {
            write_settings(path, &settings)?;
            (settings, SettingsSource::Repaired)
        }
        Err(e) => (
            Settings::default(),
            SettingsSource::Defaulted {
                reason: e.to_string(),
            },
        ),
    };

    Ok(LoadedSettings {
        settings,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `settings` to `path` as pretty JSON, creating parent directories.
pub fn write_settings(path: &Path, settings: &Settings) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    fs::write(path, settings.to_json_pretty()?)?;
    Ok(())
}
