//! Transfer identifiers, requests, and progress snapshots.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Unique identifier of one transfer.
///
/// Allocated when the request is built so callers can wire a cancel action
/// before the first byte arrives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(String);

impl TransferId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransferId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A request to stream `url` into `destination_dir`.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Identifier assigned to this transfer.
    pub id: TransferId,
    /// Source URL.
    pub url: Url,
    /// Directory the file is written into, under the URL's last path segment.
    pub destination_dir: PathBuf,
}

impl TransferRequest {
    pub fn new(url: Url, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: TransferId::new(),
            url,
            destination_dir: destination_dir.into(),
        }
    }
}

/// Progress of a transfer at one point in time.
///
/// Each snapshot supersedes the previous one; none are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSnapshot {
    /// Transfer this snapshot belongs to.
    pub identifier: Option<TransferId>,
    /// Bytes written to disk so far.
    pub bytes_written: u64,
    /// Declared body length; `0` when the server did not send one.
    pub total_bytes: u64,
}

impl DownloadSnapshot {
    pub const fn new(identifier: Option<TransferId>, bytes_written: u64, total_bytes: u64) -> Self {
        Self {
            identifier,
            bytes_written,
            total_bytes,
        }
    }

    /// Fraction complete in `0.0..=1.0`; `0.0` when the total is unknown.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.bytes_written as f64 / self.total_bytes as f64).min(1.0)
    }

    /// Whole percent complete, or `None` when the total is unknown.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> Option<u32> {
        if self.total_bytes == 0 {
            return None;
        }
        Some((self.progress() * 100.0).floor() as u32)
    }

    /// Whether every declared byte has been written.
    pub const fn is_complete(&self) -> bool {
        self.total_bytes > 0 && self.bytes_written >= self.total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_guards_unknown_total() {
        let snapshot = DownloadSnapshot::new(None, 4096, 0);
        assert!(snapshot.progress().abs() < f64::EPSILON);
        assert_eq!(snapshot.percentage(), None);
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn percentage_floors() {
        let snapshot = DownloadSnapshot::new(None, 999, 1000);
        assert_eq!(snapshot.percentage(), Some(99));

        let snapshot = DownloadSnapshot::new(None, 1000, 1000);
        assert_eq!(snapshot.percentage(), Some(100));
        assert!(snapshot.is_complete());
    }

    #[test]
    fn progress_is_capped_when_server_under_reports() {
        let snapshot = DownloadSnapshot::new(None, 1500, 1000);
        assert!((snapshot.progress() - 1.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.percentage(), Some(100));
    }

    #[test]
    fn transfer_ids_are_unique() {
        let a = TransferId::new();
        let b = TransferId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn request_assigns_identifier_up_front() {
        let url = Url::parse("https://example.com/driver.exe").unwrap();
        let first = TransferRequest::new(url.clone(), "/tmp");
        let second = TransferRequest::new(url, "/tmp");
        assert_ne!(first.id, second.id);
        assert_eq!(first.destination_dir, PathBuf::from("/tmp"));
    }
}
