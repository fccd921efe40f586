//! Notification values and progress tracking.

mod model;
mod progress;

pub use model::{
    ActionButton, ActionStyle, Notification, NotificationId, NotificationKind, ProgressData,
};
pub use progress::{ProgressTracker, format_bytes};
