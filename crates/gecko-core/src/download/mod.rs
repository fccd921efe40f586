//! Download domain types shared by the engine and the update flow.

mod errors;
mod types;

pub use errors::{DownloadError, DownloadResult};
pub use types::{DownloadSnapshot, TransferId, TransferRequest};
