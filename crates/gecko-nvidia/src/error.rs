//! Internal error types for catalog operations.
//!
//! These errors are internal to `gecko-nvidia` and are mapped to
//! [`gecko_core::CatalogError`] at the port boundary.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type NvidiaResult<T> = Result<T, NvidiaError>;

#[derive(Debug, Error)]
pub enum NvidiaError {
    /// Request failed with an HTTP error status.
    #[error("Request failed with status {status}: {url}")]
    RequestFailed { status: u16, url: String },

    /// The response decoded but did not make sense.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
