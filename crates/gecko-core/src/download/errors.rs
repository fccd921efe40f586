//! Download error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error` or `reqwest::Error`. For I/O errors, we
//! capture the kind and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for download transfers.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// The server answered with a non-success status. No file was created.
    #[error("Bad response: HTTP {status}")]
    BadResponse {
        /// HTTP status code.
        status: u16,
    },

    /// File create/write/flush error. A partial file may remain on disk.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Connection or transport error while requesting or streaming.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
    },

    /// The URL has no file name to save under.
    #[error("Invalid download URL: {url}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },

    /// Another transfer is already running on this engine.
    #[error("A transfer is already active: {id}")]
    AlreadyActive {
        /// Identifier of the in-flight transfer.
        id: String,
    },

    /// Transfer was cancelled by the user. The partial file was removed.
    #[error("Download cancelled")]
    Cancelled,
}

impl DownloadError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn bad_response(status: u16) -> Self {
        Self::BadResponse { status }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn already_active(id: impl Into<String>) -> Self {
        Self::AlreadyActive { id: id.into() }
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BadResponse { status } => {
                format!("The download server refused the request (HTTP {status}).")
            }
            Self::Io { message, .. } => format!("Could not write the installer: {message}"),
            Self::Network { message } => format!("Network error: {message}"),
            Self::InvalidUrl { url } => format!("The driver URL is not downloadable: {url}"),
            Self::AlreadyActive { .. } => "A driver download is already in progress.".to_string(),
            Self::Cancelled => "Download was cancelled.".to_string(),
        }
    }
}

/// Convenience result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;
