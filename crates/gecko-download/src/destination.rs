//! Destination path planning for transfers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gecko_core::download::{DownloadError, TransferRequest};
use gecko_core::file_name_from_url;

/// Where a transfer is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDestination {
    /// Directory the file lives in.
    pub directory: PathBuf,
    /// File name taken from the URL's last path segment.
    pub file_name: String,
}

impl DownloadDestination {
    /// Plan the destination for `request`.
    ///
    /// Fails with [`DownloadError::InvalidUrl`] when the URL has no usable
    /// last path segment.
    pub fn plan(request: &TransferRequest) -> Result<Self, DownloadError> {
        let file_name = file_name_from_url(&request.url)
            .filter(|name| name != "." && name != "..")
            .ok_or_else(|| DownloadError::invalid_url(request.url.as_str()))?;

        Ok(Self {
            directory: request.destination_dir.clone(),
            file_name,
        })
    }

    /// Full path of the destination file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Ensure the directory exists, creating it if necessary.
    pub async fn ensure_dir(&self) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))
    }

    /// Remove a file left at the destination by an earlier run.
    pub async fn clear_existing(&self) -> Result<(), DownloadError> {
        remove_if_exists(&self.path()).await
    }
}

/// Remove `path`, treating "already gone" as success.
pub(crate) async fn remove_if_exists(path: &Path) -> Result<(), DownloadError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DownloadError::from_io_error(&e)),
    }
}
