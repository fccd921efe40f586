//! Single-slot download engine.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use gecko_core::download::{DownloadError, DownloadResult, TransferId, TransferRequest};
use gecko_core::ports::{DownloadEnginePort, ProgressSink};
use tokio_util::sync::CancellationToken;

use crate::destination::DownloadDestination;
use crate::transfer;

/// The transfer currently occupying the engine.
struct ActiveSlot {
    id: TransferId,
    cancel: CancellationToken,
}

type Slot = Arc<Mutex<Option<ActiveSlot>>>;

/// Clears the slot when the owning transfer ends, however it ends.
struct SlotGuard {
    slot: Slot,
    id: TransferId,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        if slot.as_ref().is_some_and(|active| active.id == self.id) {
            *slot = None;
        }
    }
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<ActiveSlot>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Streams installers to disk, one at a time.
pub struct DownloadEngine {
    client: reqwest::Client,
    active: Slot,
}

impl DownloadEngine {
    /// Create an engine with its own HTTP client.
    pub fn new() -> DownloadResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gecko/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| DownloadError::network(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Create an engine around an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            active: Arc::new(Mutex::new(None)),
        }
    }

    fn claim(&self, id: &TransferId) -> DownloadResult<(SlotGuard, CancellationToken)> {
        let mut slot = lock(&self.active);
        if let Some(active) = slot.as_ref() {
            return Err(DownloadError::already_active(active.id.as_str()));
        }

        let cancel = CancellationToken::new();
        *slot = Some(ActiveSlot {
            id: id.clone(),
            cancel: cancel.clone(),
        });

        Ok((
            SlotGuard {
                slot: Arc::clone(&self.active),
                id: id.clone(),
            },
            cancel,
        ))
    }
}

#[async_trait]
impl DownloadEnginePort for DownloadEngine {
    async fn download(
        &self,
        request: TransferRequest,
        on_progress: ProgressSink,
    ) -> DownloadResult<PathBuf> {
        let (_guard, cancel) = match self.claim(&request.id) {
            Ok(claimed) => claimed,
            Err(e) => {
                tracing::warn!(
                    target: "gecko.download",
                    transfer_id = %request.id,
                    error = %e,
                    "Rejected concurrent transfer"
                );
                return Err(e);
            }
        };

        let destination = DownloadDestination::plan(&request)?;
        tracing::info!(
            target: "gecko.download",
            transfer_id = %request.id,
            url = %request.url,
            file = %destination.file_name,
            "Starting transfer"
        );

        transfer::run(
            &self.client,
            request.id,
            request.url,
            destination,
            cancel,
            on_progress,
        )
        .await
    }

    fn cancel(&self, id: &TransferId) -> bool {
        let slot = lock(&self.active);
        match slot.as_ref() {
            Some(active) if &active.id == id => {
                tracing::info!(target: "gecko.download", transfer_id = %id, "Cancelling transfer");
                active.cancel.cancel();
                true
            }
            _ => {
                tracing::debug!(
                    target: "gecko.download",
                    transfer_id = %id,
                    "Ignoring cancel for unknown transfer"
                );
                false
            }
        }
    }

    fn active_transfer(&self) -> Option<TransferId> {
        lock(&self.active).as_ref().map(|active| active.id.clone())
    }
}
