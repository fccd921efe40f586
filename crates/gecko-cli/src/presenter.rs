//! Terminal rendering of notifications.
//!
//! Prompts are printed with numbered buttons and answered on stdin from a
//! background thread, so the flow never blocks on the terminal. Progress
//! notifications become `indicatif` bars; Ctrl-C while one is showing clicks
//! its Cancel button.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gecko_core::{
    ActionButton, ActionRegistry, ActionStyle, Notification, NotificationId,
    NotificationPresenterPort, ProgressData,
};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

/// Bars are drawn in whole percent.
const PROGRESS_STEPS: u64 = 100;

struct ActiveProgress {
    bar: ProgressBar,
    interrupt: Option<JoinHandle<()>>,
}

/// [`NotificationPresenterPort`] that talks to the terminal.
pub struct ConsolePresenter {
    actions: Arc<ActionRegistry>,
    auto_accept: bool,
    draw_bars: bool,
    progress: Mutex<HashMap<NotificationId, ActiveProgress>>,
}

impl ConsolePresenter {
    /// With `auto_accept`, every prompt is answered with its primary button.
    pub fn new(actions: Arc<ActionRegistry>, auto_accept: bool) -> Self {
        Self {
            actions,
            auto_accept,
            draw_bars: true,
            progress: Mutex::new(HashMap::new()),
        }
    }

    /// Presenter whose progress bars are never drawn.
    pub fn without_bars(actions: Arc<ActionRegistry>, auto_accept: bool) -> Self {
        Self {
            draw_bars: false,
            ..Self::new(actions, auto_accept)
        }
    }

    fn progress(&self) -> MutexGuard<'_, HashMap<NotificationId, ActiveProgress>> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_bar(&self, title: &str) -> ProgressBar {
        let bar = if self.draw_bars {
            ProgressBar::new(PROGRESS_STEPS)
        } else {
            ProgressBar::hidden()
        };
        bar.set_length(PROGRESS_STEPS);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold} [{bar:40.cyan/blue}] {msg}")
                .map_or_else(
                    |_| ProgressStyle::default_bar(),
                    |style| style.progress_chars("█▓░"),
                ),
        );
        bar.set_prefix(title.to_string());
        bar
    }

    fn show_progress(&self, notification: &Notification) {
        if self.draw_bars {
            print_header(notification);
        }

        let bar = self.create_bar(&notification.title);
        if let Some(progress) = &notification.progress {
            apply_progress(&bar, progress);
        }

        let interrupt = notification
            .actions
            .first()
            .and_then(|cancel| self.cancel_on_interrupt(cancel.identifier.clone()));

        self.progress()
            .insert(notification.id.clone(), ActiveProgress { bar, interrupt });
    }

    /// Click `identifier` on Ctrl-C. Needs a Tokio runtime; without one
    /// the download simply cannot be interrupted from the keyboard.
    fn cancel_on_interrupt(&self, identifier: String) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let actions = Arc::clone(&self.actions);
        Some(handle.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!(target: "gecko.cli", "Interrupted; cancelling download");
                actions.invoke(&identifier);
            }
        }))
    }

    fn show_prompt(&self, notification: &Notification) {
        print_header(notification);
        let buttons = &notification.actions;
        if buttons.is_empty() {
            return;
        }
        println!("   {}", button_row(buttons));

        if self.auto_accept {
            let choice = primary_button(buttons);
            println!("   > {}", choice.title);
            self.actions.invoke(&choice.identifier);
            return;
        }

        let actions = Arc::clone(&self.actions);
        let buttons = buttons.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            read_choice(&actions, &buttons, &mut stdin.lock());
        });
    }
}

impl NotificationPresenterPort for ConsolePresenter {
    fn present(&self, notification: &Notification) {
        tracing::debug!(
            target: "gecko.cli",
            id = %notification.id,
            kind = ?notification.kind,
            title = %notification.title,
            "Presenting notification"
        );
        if notification.is_progress() {
            self.show_progress(notification);
        } else {
            self.show_prompt(notification);
        }
    }

    fn update(&self, id: &NotificationId, progress: &ProgressData) {
        if let Some(active) = self.progress().get(id) {
            apply_progress(&active.bar, progress);
        }
    }

    fn dismiss(&self, id: &NotificationId) {
        let Some(active) = self.progress().remove(id) else {
            return;
        };
        if let Some(interrupt) = active.interrupt {
            interrupt.abort();
        }
        active.bar.finish_and_clear();
    }
}

fn apply_progress(bar: &ProgressBar, progress: &ProgressData) {
    bar.set_position(u64::from(progress.sequence).min(PROGRESS_STEPS));
    match &progress.value_label {
        Some(label) => bar.set_message(format!("{label}  {}", progress.status)),
        None => bar.set_message(progress.status.clone()),
    }
}

fn print_header(notification: &Notification) {
    println!();
    println!("== {} ==", notification.title);
    if let Some(subtitle) = &notification.subtitle {
        println!("   {subtitle}");
    }
}

fn button_row(buttons: &[ActionButton]) -> String {
    buttons
        .iter()
        .enumerate()
        .map(|(i, button)| format!("[{}] {}", i + 1, button.title))
        .collect::<Vec<_>>()
        .join("  ")
}

/// The button `--yes` presses: the first success-styled one, else the first.
///
/// `buttons` must be non-empty.
fn primary_button(buttons: &[ActionButton]) -> &ActionButton {
    buttons
        .iter()
        .find(|b| b.style == ActionStyle::Success)
        .unwrap_or(&buttons[0])
}

/// The button pressed when input ends without a choice.
fn dismiss_button(buttons: &[ActionButton]) -> Option<&ActionButton> {
    buttons
        .iter()
        .find(|b| matches!(b.title.as_str(), "Cancel" | "Dismiss"))
        .or_else(|| buttons.last())
}

/// Map a typed answer (a 1-based index or a button title) to an identifier.
pub fn resolve_choice<'a>(input: &str, buttons: &'a [ActionButton]) -> Option<&'a str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let by_index = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| buttons.get(i));

    by_index
        .or_else(|| buttons.iter().find(|b| b.title.eq_ignore_ascii_case(input)))
        .map(|b| b.identifier.as_str())
}

/// Read answers until one matches a button, then click it.
///
/// End of input or a read error clicks the dismiss button.
fn read_choice(actions: &ActionRegistry, buttons: &[ActionButton], input: &mut impl BufRead) {
    let mut line = String::new();
    loop {
        print!("   Choose 1-{}: ", buttons.len());
        let _ = io::stdout().flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                if let Some(button) = dismiss_button(buttons) {
                    actions.invoke(&button.identifier);
                }
                return;
            }
            Ok(_) => {
                if let Some(identifier) = resolve_choice(&line, buttons) {
                    actions.invoke(identifier);
                    return;
                }
                println!("   Enter a number or a button name.");
            }
        }
    }
}
