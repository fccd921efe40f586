//! Progress de-duplication.
//!
//! Downloads emit a snapshot per received chunk, far more often than a
//! notification needs redrawing. [`ProgressTracker`] turns snapshots into
//! [`ProgressData`] only when the whole-number percentage changes.

use crate::download::DownloadSnapshot;

use super::model::ProgressData;

/// Converts snapshots into progress updates, dropping repeats.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    title: String,
    last_sequence: Option<u32>,
}

impl ProgressTracker {
    /// Create a tracker whose updates carry `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            last_sequence: None,
        }
    }

    /// Produce an update for `snapshot`, or `None` if it would show the same
    /// percentage as the last forwarded update.
    pub fn update(&mut self, snapshot: &DownloadSnapshot) -> Option<ProgressData> {
        let sequence = snapshot.percentage().unwrap_or(0);

        if self.last_sequence == Some(sequence) {
            return None;
        }
        self.last_sequence = Some(sequence);

        Some(ProgressData {
            sequence,
            title: self.title.clone(),
            value: snapshot.progress(),
            value_label: snapshot.percentage().map(|p| format!("{p}%")),
            status: format!(
                "{}/{}",
                format_bytes(snapshot.bytes_written),
                format_bytes(snapshot.total_bytes)
            ),
        })
    }
}

/// Format a byte count with decimal (file-size) units.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    let (scaled, unit) = if value >= 1_000_000_000.0 {
        (value / 1_000_000_000.0, "GB")
    } else if value >= 1_000_000.0 {
        (value / 1_000_000.0, "MB")
    } else if value >= 1_000.0 {
        (value / 1_000.0, "KB")
    } else {
        return format!("{bytes} bytes");
    };
    format!("{scaled:.1} {unit}")
}
