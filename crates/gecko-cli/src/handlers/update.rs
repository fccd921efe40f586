//! Update command handler.
//!
//! Runs the full notification flow once.

use anyhow::Result;
use gecko_core::FlowOutcome;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the update command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let Some(outcome) = run_interruptible(ctx).await else {
        println!("Interrupted.");
        return Ok(());
    };

    println!("{}", describe_outcome(&outcome));
    match outcome {
        FlowOutcome::Failed(e) => Err(CliError::from(e).into()),
        _ => Ok(()),
    }
}

/// Run one flow cycle, stopping early on Ctrl-C.
///
/// Ctrl-C during a download is left to the presenter, which cancels the
/// transfer; the flow then finishes with [`FlowOutcome::Cancelled`]. Anywhere
/// else it abandons the cycle and returns `None`.
pub async fn run_interruptible(ctx: &CliContext) -> Option<FlowOutcome> {
    let run = ctx.flow.run();
    tokio::pin!(run);

    loop {
        tokio::select! {
            outcome = &mut run => return Some(outcome),
            _ = tokio::signal::ctrl_c() => {
                if ctx.engine.active_transfer().is_none() {
                    tracing::info!(target: "gecko.cli", "Interrupted");
                    return None;
                }
            }
        }
    }
}

/// Terminal summary of a flow outcome.
pub fn describe_outcome(outcome: &FlowOutcome) -> String {
    match outcome {
        FlowOutcome::NoUpdate => "No driver update available.".to_string(),
        FlowOutcome::Declined => "Update declined.".to_string(),
        FlowOutcome::Installed(path) => format!("Installer started: {}", path.display()),
        FlowOutcome::Downloaded(path) => format!("Installer saved to {}", path.display()),
        FlowOutcome::Cancelled => "Download cancelled.".to_string(),
        FlowOutcome::Failed(e) => format!("Download failed: {}", e.user_message()),
    }
}
