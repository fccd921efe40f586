//! Download engine port.
//!
//! Abstracts the streaming transfer behind a small async API. No
//! `CancellationToken` or HTTP client types leak through; cancellation is by
//! [`TransferId`].

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::download::{DownloadResult, DownloadSnapshot, TransferId, TransferRequest};

/// Callback receiving progress snapshots for one transfer.
///
/// Called synchronously from the transfer task, in increasing
/// `bytes_written` order, and never after `download` returns.
pub type ProgressSink = Arc<dyn Fn(DownloadSnapshot) + Send + Sync>;

/// Port for a single-slot streaming downloader.
#[async_trait]
pub trait DownloadEnginePort: Send + Sync {
    /// Stream `request.url` into `request.destination_dir`.
    ///
    /// Returns the path of the written file. Rejects with
    /// [`DownloadError::AlreadyActive`](crate::download::DownloadError::AlreadyActive)
    /// when another transfer is in flight on this engine.
    async fn download(
        &self,
        request: TransferRequest,
        on_progress: ProgressSink,
    ) -> DownloadResult<PathBuf>;

    /// Cancel the in-flight transfer if its id matches.
    ///
    /// Returns `false` for stale or unknown ids, which are otherwise ignored.
    fn cancel(&self, id: &TransferId) -> bool;

    /// Identifier of the transfer currently in flight, if any.
    fn active_transfer(&self) -> Option<TransferId>;
}
