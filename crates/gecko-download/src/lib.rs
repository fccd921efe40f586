//! Streaming download engine.
//!
//! [`DownloadEngine`] implements [`gecko_core::DownloadEnginePort`]: one
//! transfer at a time, written chunk by chunk straight to the destination
//! file, with a progress snapshot per chunk and cooperative cancellation by
//! transfer id.
//!
//! Partial files are removed when a transfer is cancelled and kept when it
//! fails.

mod destination;
mod engine;
mod transfer;

pub use destination::DownloadDestination;
pub use engine::DownloadEngine;

// Re-export core types for convenience
pub use gecko_core::download::{
    DownloadError, DownloadResult, DownloadSnapshot, TransferId, TransferRequest,
};
pub use gecko_core::ports::{DownloadEnginePort, ProgressSink};

