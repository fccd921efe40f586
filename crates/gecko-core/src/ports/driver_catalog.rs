//! NVIDIA driver catalog port.
//!
//! The catalog maps human-readable GPU and OS facts onto the numeric
//! identifiers NVIDIA's lookup service expects, then lists the drivers it
//! offers for that pair. The implementation lives in `gecko-nvidia`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DriverDownload, OsInfo};

/// Errors from catalog operations.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with a non-success status.
    #[error("Catalog request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be decoded.
    #[error("Invalid catalog response: {message}")]
    Decode { message: String },

    /// A URL in the response (or built for the request) was not valid.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Port for NVIDIA's GPU/OS identifier tables and driver lookup.
#[async_trait]
pub trait DriverCatalogPort: Send + Sync {
    /// Remote product identifier for a formatted GPU name.
    ///
    /// Desktop products are searched before notebook products. `Ok(None)`
    /// means the tables were fetched but the name is not listed.
    async fn gpu_id(&self, formatted_name: &str) -> CatalogResult<Option<String>>;

    /// Remote identifier for an OS version and bitness.
    async fn os_id(&self, os: &OsInfo) -> CatalogResult<Option<String>>;

    /// Drivers offered for the `(gpu_id, os_id)` pair, newest first.
    async fn lookup(&self, gpu_id: &str, os_id: &str) -> CatalogResult<Vec<DriverDownload>>;
}
