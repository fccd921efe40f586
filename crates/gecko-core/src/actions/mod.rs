//! Action dispatch for interactive notification buttons.
//!
//! When a notification with buttons is presented, each button's handler is
//! registered here under an opaque identifier. The notification subsystem
//! later reports clicks by identifier only; [`ActionRegistry::invoke`] looks
//! the handler up, removes it, and runs it.
//!
//! Clicks are untrusted and unordered relative to registry state: a click for
//! an identifier that was already handled (or never registered) is ignored.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

/// A one-shot button handler.
pub type ActionHandler = Box<dyn FnOnce() + Send + 'static>;

/// Thread-safe map from action identifiers to one-shot handlers.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: Mutex<HashMap<String, ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh, globally unique action identifier.
    pub fn next_identifier() -> String {
        format!("action-{}", Uuid::new_v4())
    }

    /// Register `handler` under `identifier`, replacing any existing entry.
    pub fn register<F>(&self, identifier: impl Into<String>, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let identifier = identifier.into();
        let replaced = self
            .lock()
            .insert(identifier.clone(), Box::new(handler))
            .is_some();

        if replaced {
            tracing::debug!(
                target: "gecko.actions",
                %identifier,
                "Replaced existing action handler"
            );
        }
    }

    /// Remove and run the handler for `identifier`.
    ///
    /// Returns `false` (and does nothing) if no handler is registered. The
    /// entry is removed while the lock is held and the handler runs after it
    /// is released, so concurrent duplicate clicks run the handler once and
    /// handlers may themselves register new actions.
    pub fn invoke(&self, identifier: &str) -> bool {
        let handler = self.lock().remove(identifier);

        match handler {
            Some(handler) => {
                tracing::debug!(target: "gecko.actions", %identifier, "Invoking action");
                handler();
                true
            }
            None => {
                tracing::debug!(
                    target: "gecko.actions",
                    %identifier,
                    "Ignoring click for unknown or already-handled action"
                );
                false
            }
        }
    }

    /// Drop the handler for `identifier` without running it.
    pub fn remove(&self, identifier: &str) -> bool {
        self.lock().remove(identifier).is_some()
    }

    /// Whether a handler is registered for `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.lock().contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every registered handler.
    pub fn clear(&self) {
        let mut handlers = self.lock();
        let dropped = handlers.len();
        handlers.clear();
        tracing::debug!(target: "gecko.actions", dropped, "Cleared action registry");
    }

    // A panicking handler runs outside the lock, so poisoning can only come
    // from a panic inside HashMap itself; the map is still usable then.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ActionHandler>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("len", &self.len())
            .finish()
    }
}
