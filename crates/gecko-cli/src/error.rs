//! CLI-specific error types and mappings.
//!
//! Library errors are converted into [`CliError`] at the handler boundary so
//! `main` can pick a sysexits-style exit code.

use gecko_core::{CatalogError, DownloadError, PathError, ResolutionError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid settings or settings file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The driver catalog could not be queried.
    #[error("Driver lookup failed: {0}")]
    Lookup(String),

    /// The installer download failed.
    #[error("Download failed: {0}")]
    Download(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 1: General error
    /// - 69: Service unavailable (catalog lookup)
    /// - 74: I/O error (including failed downloads)
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Lookup(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) | Self::Download(_) => 74, // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

/// Exit code for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::Lookup(err.to_string())
    }
}

impl From<ResolutionError> for CliError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Lookup(inner) => inner.into(),
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::Io { message, .. } => Self::Io(message),
            other => Self::Download(other.user_message()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
