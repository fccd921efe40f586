//! A single in-flight transfer.
//!
//! ```text
//! requesting ──status ok──► header received ──► streaming ──► completed
//!     │                         (file created)      │
//!     └── non-2xx: BadResponse, no file             ├── cancel: file removed
//!                                                   └── I/O / network error: file kept
//! ```

use std::path::PathBuf;

use futures_util::StreamExt;
use gecko_core::download::{DownloadError, DownloadResult, DownloadSnapshot, TransferId};
use gecko_core::ports::ProgressSink;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::destination::{DownloadDestination, remove_if_exists};

/// State owned by the task running one transfer.
struct ActiveTransfer {
    id: TransferId,
    path: PathBuf,
    expected_bytes: u64,
    written_bytes: u64,
    last_reported: Option<u64>,
    file: File,
}

impl ActiveTransfer {
    fn report(&mut self, on_progress: &ProgressSink) {
        self.last_reported = Some(self.written_bytes);
        on_progress(DownloadSnapshot::new(
            Some(self.id.clone()),
            self.written_bytes,
            self.expected_bytes,
        ));
    }

    /// Copy the body into the file until it ends, fails, or is cancelled.
    async fn stream(
        &mut self,
        response: reqwest::Response,
        cancel: &CancellationToken,
        on_progress: &ProgressSink,
    ) -> DownloadResult<()> {
        let mut body = response.bytes_stream();

        loop {
            let chunk = tokio::select! {
                biased;

                () = cancel.cancelled() => return Err(DownloadError::Cancelled),

                chunk = body.next() => chunk,
            };

            match chunk {
                Some(Ok(bytes)) => {
                    self.file
                        .write_all(&bytes)
                        .await
                        .map_err(|e| DownloadError::from_io_error(&e))?;
                    self.written_bytes += bytes.len() as u64;
                    self.report(on_progress);
                }
                Some(Err(e)) => return Err(DownloadError::network(e.to_string())),
                None => break,
            }
        }

        self.file
            .flush()
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;

        if self.last_reported != Some(self.written_bytes) {
            self.report(on_progress);
        }
        Ok(())
    }
}

/// Run one transfer to a terminal state.
pub(crate) async fn run(
    client: &reqwest::Client,
    id: TransferId,
    url: reqwest::Url,
    destination: DownloadDestination,
    cancel: CancellationToken,
    on_progress: ProgressSink,
) -> DownloadResult<PathBuf> {
    let response = tokio::select! {
        biased;

        () = cancel.cancelled() => return Err(DownloadError::Cancelled),

        response = client.get(url).send() => {
            response.map_err(|e| DownloadError::network(e.to_string()))?
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(
            target: "gecko.download",
            transfer_id = %id,
            status = status.as_u16(),
            "Server rejected download"
        );
        return Err(DownloadError::bad_response(status.as_u16()));
    }

    destination.ensure_dir().await?;
    destination.clear_existing().await?;
    let path = destination.path();
    let file = File::create(&path)
        .await
        .map_err(|e| DownloadError::from_io_error(&e))?;

    let expected_bytes = response.content_length().unwrap_or(0);
    tracing::debug!(
        target: "gecko.download",
        transfer_id = %id,
        path = %path.display(),
        expected_bytes,
        "Streaming to destination"
    );

    let mut transfer = ActiveTransfer {
        id,
        path,
        expected_bytes,
        written_bytes: 0,
        last_reported: None,
        file,
    };
    let result = transfer.stream(response, &cancel, &on_progress).await;

    let ActiveTransfer {
        id,
        path,
        written_bytes,
        file,
        ..
    } = transfer;
    // Close the handle before touching the path.
    drop(file);

    match result {
        Ok(()) => {
            tracing::info!(
                target: "gecko.download",
                transfer_id = %id,
                path = %path.display(),
                bytes = written_bytes,
                "Download complete"
            );
            Ok(path)
        }
        Err(DownloadError::Cancelled) => {
            if let Err(e) = remove_if_exists(&path).await {
                tracing::warn!(
                    target: "gecko.download",
                    transfer_id = %id,
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partial file"
                );
            }
            tracing::info!(
                target: "gecko.download",
                transfer_id = %id,
                bytes = written_bytes,
                "Download cancelled"
            );
            Err(DownloadError::Cancelled)
        }
        Err(e) => {
            tracing::error!(
                target: "gecko.download",
                transfer_id = %id,
                path = %path.display(),
                bytes = written_bytes,
                error = %e,
                "Download failed; partial file kept"
            );
            Err(e)
        }
    }
}
