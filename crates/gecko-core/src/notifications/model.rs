//! Declarative notification values.
//!
//! A [`Notification`] describes what to show, not how: presenters translate it
//! into their native call sequence at the boundary. Buttons carry only an
//! opaque action identifier; the behaviour behind each button lives in the
//! [`ActionRegistry`](crate::actions::ActionRegistry).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a presented notification (used for update and dismiss).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    /// Neutral/secondary.
    #[default]
    Default,
    /// Positive, e.g. "Download".
    Success,
    /// Destructive.
    Critical,
}

/// A button on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    /// Identifier reported back when the button is clicked.
    pub identifier: String,
    pub title: String,
    pub style: ActionStyle,
}

impl ActionButton {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        style: ActionStyle,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            style,
        }
    }

    /// A neutral "Cancel" button.
    pub fn cancel(identifier: impl Into<String>) -> Self {
        Self::new(identifier, "Cancel", ActionStyle::Default)
    }
}

/// What a notification is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A newer driver is available.
    UpdateAvailable,
    /// A download is in progress; receives progress updates.
    Progress,
    /// The installer finished downloading.
    Completed,
}

/// Immutable description of a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub actions: Vec<ActionButton>,
    /// Initial bar state for progress notifications.
    pub progress: Option<ProgressData>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            subtitle: None,
            actions: Vec::new(),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionButton) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ActionButton>) -> Self {
        self.actions.extend(actions);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressData) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Identifiers of every button on this notification.
    pub fn action_identifiers(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.identifier.as_str())
    }

    pub const fn is_progress(&self) -> bool {
        matches!(self.kind, NotificationKind::Progress)
    }
}

/// A progress bar update for a [`NotificationKind::Progress`] notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    /// Monotonic sequence; presenters may drop updates older than the last one shown.
    pub sequence: u32,
    pub title: String,
    /// Fraction complete in `0.0..=1.0`.
    pub value: f64,
    /// Text shown instead of the raw value, e.g. `42%`.
    pub value_label: Option<String>,
    /// Secondary line, e.g. `12.3 MB/456.7 MB`.
    pub status: String,
}
