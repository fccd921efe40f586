//! Outbound ports for user-facing side effects: notifications, opening
//! links, and launching the downloaded installer.

use std::path::Path;

use url::Url;

use crate::notifications::{Notification, NotificationId, ProgressData};

/// Renders notifications.
///
/// Presenters report button clicks by dispatching the button's identifier
/// into the [`ActionRegistry`](crate::actions::ActionRegistry) they were
/// constructed with.
pub trait NotificationPresenterPort: Send + Sync {
    /// Show a new notification.
    fn present(&self, notification: &Notification);

    /// Update the progress bar of a presented progress notification.
    fn update(&self, id: &NotificationId, progress: &ProgressData);

    /// Remove a presented notification. Unknown ids are ignored.
    fn dismiss(&self, id: &NotificationId);
}

/// Opens a URL in the user's browser.
pub trait UrlOpenerPort: Send + Sync {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}

/// Launches a downloaded file (the driver installer).
pub trait LauncherPort: Send + Sync {
    fn launch(&self, path: &Path) -> std::io::Result<()>;
}
