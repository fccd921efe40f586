//! Settings domain types and validation.
//!
//! Settings are stored as JSON. A file missing some fields is still
//! accepted (missing fields take their defaults) but reported as incomplete
//! so the caller can write the completed file back.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default interval between update checks (12 hours).
pub const DEFAULT_UPDATE_CHECK_INTERVAL_SECS: u64 = 43_200;

/// Shortest allowed interval between update checks (5 minutes).
pub const MIN_UPDATE_CHECK_INTERVAL_SECS: u64 = 300;

/// Longest allowed interval between update checks (7 days).
pub const MAX_UPDATE_CHECK_INTERVAL_SECS: u64 = 604_800;

/// Field names every complete settings file contains.
const REQUIRED_KEYS: [&str; 3] = ["log_level", "update_check_interval_secs", "launch_at_startup"];

/// How much gets logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Logging disabled.
    #[default]
    None,
    /// Errors only.
    Critical,
    /// Warnings and errors.
    Warning,
    /// Everything.
    Debug,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::None => "off",
            Self::Critical => "error",
            Self::Warning => "warn",
            Self::Debug => "debug",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub log_level: LogLevel,

    /// Seconds between checks in `gecko watch`; clamped on load.
    pub update_check_interval_secs: u64,

    /// Whether the checker should be started with the user session.
    pub launch_at_startup: bool,

    /// Where installers are saved. `None` uses the platform downloads directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            update_check_interval_secs: DEFAULT_UPDATE_CHECK_INTERVAL_SECS,
            launch_at_startup: true,
            download_dir: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON.
    ///
    /// Returns the clamped settings and whether the document was incomplete
    /// (a required field was missing).
    pub fn from_json(json: &str) -> Result<(Self, bool), SettingsError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        let incomplete = contains_incompletes(&value);
        let settings: Self =
            serde_json::from_value(value).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok((settings.clamped(), incomplete))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Copy of these settings with the check interval forced into range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.update_check_interval_secs = self
            .update_check_interval_secs
            .clamp(MIN_UPDATE_CHECK_INTERVAL_SECS, MAX_UPDATE_CHECK_INTERVAL_SECS);
        self
    }

    /// The interval between checks, clamped to the allowed range.
    #[must_use]
    pub fn update_check_interval(&self) -> Duration {
        Duration::from_secs(
            self.update_check_interval_secs
                .clamp(MIN_UPDATE_CHECK_INTERVAL_SECS, MAX_UPDATE_CHECK_INTERVAL_SECS),
        )
    }
}

/// Whether a settings document lacks any required field.
///
/// Non-object documents count as incomplete.
pub fn contains_incompletes(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_none_or(|map| REQUIRED_KEYS.iter().any(|key| !map.contains_key(*key)))
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if !(MIN_UPDATE_CHECK_INTERVAL_SECS..=MAX_UPDATE_CHECK_INTERVAL_SECS)
        .contains(&settings.update_check_interval_secs)
    {
        return Err(SettingsError::InvalidInterval(
            settings.update_check_interval_secs,
        ));
    }

    if settings
        .download_dir
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(SettingsError::EmptyDownloadDir);
    }

    Ok(())
}

/// Settings errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Parse(String),

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error(
        "Update check interval must be between {MIN_UPDATE_CHECK_INTERVAL_SECS} and {MAX_UPDATE_CHECK_INTERVAL_SECS} seconds, got {0}"
    )]
    InvalidInterval(u64),

    #[error("Download directory cannot be empty")]
    EmptyDownloadDir,
}
