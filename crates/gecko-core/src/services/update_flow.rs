//! Notification lifecycle for one update cycle.
//!
//! ```text
//! resolve ──► "New NVIDIA driver available" ──Download──► progress notification
//!                  │                                    │  (Cancel → engine.cancel)
//!                  └─Cancel / View details──► Declined  ▼
//!                                       success ──► "Driver downloaded"
//!                                                        └──Install──► launcher
//! ```
//!
//! Every button is registered in the shared [`ActionRegistry`]; the flow
//! waits on a channel fed by those handlers, so it does not care which
//! thread the presenter reports clicks from.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use super::update_resolver::UpdateResolver;
use crate::actions::ActionRegistry;
use crate::domain::DriverDownload;
use crate::download::{DownloadError, DownloadSnapshot, TransferRequest};
use crate::notifications::{
    ActionButton, ActionStyle, Notification, NotificationKind, ProgressTracker,
};
use crate::ports::{
    DownloadEnginePort, LauncherPort, NotificationPresenterPort, ProgressSink, UrlOpenerPort,
};

const UPDATE_TITLE: &str = "New NVIDIA driver available";
const PROGRESS_TITLE: &str = "Downloading driver";
const COMPLETED_TITLE: &str = "Driver downloaded";

/// How one run of the flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Nothing to offer (up to date, skipped, or the lookup failed).
    NoUpdate,
    /// The user dismissed the offer.
    Declined,
    /// The installer was downloaded and launched.
    Installed(PathBuf),
    /// The installer was downloaded but not launched.
    Downloaded(PathBuf),
    /// The user cancelled the download.
    Cancelled,
    /// The download failed.
    Failed(DownloadError),
}

/// Collaborators of [`UpdateFlow`], wired at the composition root.
#[derive(Clone)]
pub struct UpdateFlowDeps {
    pub resolver: Arc<UpdateResolver>,
    pub engine: Arc<dyn DownloadEnginePort>,
    pub presenter: Arc<dyn NotificationPresenterPort>,
    pub actions: Arc<ActionRegistry>,
    pub opener: Arc<dyn UrlOpenerPort>,
    pub launcher: Arc<dyn LauncherPort>,
    /// Directory installers are written into.
    pub download_dir: PathBuf,
}

/// Offer-download-install coordinator.
pub struct UpdateFlow {
    deps: UpdateFlowDeps,
}

/// A button together with the value its click resolves the prompt to.
type Choice<T> = (ActionButton, Box<dyn FnOnce() -> T + Send + 'static>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offer {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Install,
    Dismiss,
}

impl UpdateFlow {
    pub const fn new(deps: UpdateFlowDeps) -> Self {
        Self { deps }
    }

    /// Run one full cycle: resolve, offer, download, offer install.
    pub async fn run(&self) -> FlowOutcome {
        let check = match self.deps.resolver.fetch().await {
            Ok(check) => check,
            Err(e) => {
                tracing::warn!(target: "gecko.flow", error = %e, "Update check failed");
                return FlowOutcome::NoUpdate;
            }
        };
        tracing::debug!(target: "gecko.flow", ?check, "Update check finished");
        let Some(download) = check.into_download() else {
            return FlowOutcome::NoUpdate;
        };

        self.offer_download(download).await
    }

    /// Offer `download` to the user and carry out their choice.
    pub async fn offer_download(&self, download: DriverDownload) -> FlowOutcome {
        let subtitle = format!("Version {}", download.version);
        let notification = Notification::new(NotificationKind::UpdateAvailable, UPDATE_TITLE)
            .with_subtitle(&subtitle);

        let mut choices: Vec<Choice<Offer>> = vec![
            (
                ActionButton::new(
                    ActionRegistry::next_identifier(),
                    "Download",
                    ActionStyle::Success,
                ),
                Box::new(|| Offer::Accept),
            ),
            (
                ActionButton::cancel(ActionRegistry::next_identifier()),
                Box::new(|| Offer::Decline),
            ),
        ];
        if let Some(details) = download.details_url.clone() {
            let opener = Arc::clone(&self.deps.opener);
            choices.push((
                ActionButton::new(
                    ActionRegistry::next_identifier(),
                    "View details",
                    ActionStyle::Default,
                ),
                Box::new(move || {
                    if let Err(e) = opener.open(&details) {
                        tracing::warn!(
                            target: "gecko.flow",
                            url = %details,
                            error = %e,
                            "Failed to open release notes"
                        );
                    }
                    Offer::Decline
                }),
            ));
        }

        match self.prompt(notification, choices).await {
            Some(Offer::Accept) => self.download(&download, &subtitle).await,
            Some(Offer::Decline) | None => {
                tracing::info!(
                    target: "gecko.flow",
                    version = %download.version,
                    "Update declined"
                );
                FlowOutcome::Declined
            }
        }
    }

    async fn download(&self, download: &DriverDownload, subtitle: &str) -> FlowOutcome {
        let request = TransferRequest::new(download.url.clone(), &self.deps.download_dir);
        let transfer_id = request.id.clone();

        // Set when Cancel is clicked before the engine has claimed the transfer;
        // the progress sink forwards it once the transfer is live.
        let cancel_requested = Arc::new(AtomicBool::new(false));
        let cancel_id = ActionRegistry::next_identifier();
        {
            let engine = Arc::clone(&self.deps.engine);
            let transfer_id = transfer_id.clone();
            let cancel_requested = Arc::clone(&cancel_requested);
            self.deps.actions.register(cancel_id.clone(), move || {
                if !engine.cancel(&transfer_id) {
                    cancel_requested.store(true, Ordering::SeqCst);
                }
            });
        }

        let mut tracker = ProgressTracker::new(PROGRESS_TITLE);
        let mut notification = Notification::new(NotificationKind::Progress, PROGRESS_TITLE)
            .with_subtitle(subtitle)
            .with_action(ActionButton::cancel(&cancel_id));
        let initial = DownloadSnapshot::new(Some(transfer_id.clone()), 0, 0);
        if let Some(initial) = tracker.update(&initial) {
            notification = notification.with_progress(initial);
        }
        let progress_id = notification.id.clone();
        self.deps.presenter.present(&notification);

        let sink: ProgressSink = {
            let presenter = Arc::clone(&self.deps.presenter);
            let engine = Arc::clone(&self.deps.engine);
            let transfer_id = transfer_id.clone();
            let progress_id = progress_id.clone();
            let tracker = Mutex::new(tracker);
            Arc::new(move |snapshot: DownloadSnapshot| {
                if cancel_requested.load(Ordering::SeqCst) {
                    engine.cancel(&transfer_id);
                }
                let update = tracker
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .update(&snapshot);
                if let Some(progress) = update {
                    presenter.update(&progress_id, &progress);
                }
            })
        };

        tracing::info!(
            target: "gecko.flow",
            transfer_id = %transfer_id,
            url = %download.url,
            "Starting driver download"
        );
        let result = self.deps.engine.download(request, sink).await;

        self.deps.actions.remove(&cancel_id);
        self.deps.presenter.dismiss(&progress_id);

        match result {
            Ok(path) => self.offer_install(path, subtitle).await,
            Err(e) if e.is_cancelled() => {
                tracing::info!(
                    target: "gecko.flow",
                    transfer_id = %transfer_id,
                    "Download cancelled"
                );
                FlowOutcome::Cancelled
            }
            Err(e) => {
                tracing::error!(
                    target: "gecko.flow",
                    transfer_id = %transfer_id,
                    error = %e,
                    "Download failed"
                );
                FlowOutcome::Failed(e)
            }
        }
    }

    async fn offer_install(&self, path: PathBuf, subtitle: &str) -> FlowOutcome {
        tracing::info!(target: "gecko.flow", path = %path.display(), "Driver downloaded");

        let notification =
            Notification::new(NotificationKind::Completed, COMPLETED_TITLE).with_subtitle(subtitle);
        let choices: Vec<Choice<Completion>> = vec![
            (
                ActionButton::new(
                    ActionRegistry::next_identifier(),
                    "Install",
                    ActionStyle::Success,
                ),
                Box::new(|| Completion::Install),
            ),
            (
                ActionButton::new(
                    ActionRegistry::next_identifier(),
                    "Dismiss",
                    ActionStyle::Default,
                ),
                Box::new(|| Completion::Dismiss),
            ),
        ];

        match self.prompt(notification, choices).await {
            Some(Completion::Install) => match self.deps.launcher.launch(&path) {
                Ok(()) => FlowOutcome::Installed(path),
                Err(e) => {
                    tracing::warn!(
                        target: "gecko.flow",
                        path = %path.display(),
                        error = %e,
                        "Failed to launch installer"
                    );
                    FlowOutcome::Downloaded(path)
                }
            },
            Some(Completion::Dismiss) | None => FlowOutcome::Downloaded(path),
        }
    }

    /// Present `notification` with `choices` and wait for the first click.
    ///
    /// Returns `None` if every handler is dropped without running (e.g. the
    /// registry was cleared). Unclicked handlers are removed afterwards.
    async fn prompt<T: Send + 'static>(
        &self,
        mut notification: Notification,
        choices: Vec<Choice<T>>,
    ) -> Option<T> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        for (button, resolve) in choices {
            let tx = tx.clone();
            self.deps.actions.register(button.identifier.clone(), move || {
                // The receiver is gone only once the prompt has already resolved.
                let _ = tx.send(resolve());
            });
            notification.actions.push(button);
        }
        drop(tx);

        self.deps.presenter.present(&notification);
        let choice = rx.recv().await;

        for identifier in notification.action_identifiers() {
            self.deps.actions.remove(identifier);
        }
        choice
    }
}
