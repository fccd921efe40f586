//! Watch command handler.
//!
//! Re-runs the update flow every `update_check_interval_secs` until Ctrl-C.
//! A failed cycle is reported and the loop carries on.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};

use super::update::{describe_outcome, run_interruptible};
use crate::bootstrap::CliContext;

/// Execute the watch command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let interval = ctx.settings.update_check_interval();
    tracing::info!(
        target: "gecko.cli",
        interval_secs = interval.as_secs(),
        "Watching for driver updates"
    );

    loop {
        let Some(outcome) = run_interruptible(ctx).await else {
            break;
        };
        println!("{}", describe_outcome(&outcome));

        println!(
            "Next check at {}. Press Ctrl-C to stop.",
            next_check_label(Local::now(), interval)
        );
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("Stopped watching.");
    Ok(())
}

fn next_check_label(now: DateTime<Local>, interval: Duration) -> String {
    let next = chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now);
    next.format("%Y-%m-%d %H:%M").to_string()
}
