//! Config command handler.

use std::path::Path;

use anyhow::Result;
use gecko_core::Settings;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the config command: print the settings file location and the
/// effective settings (after command-line overrides).
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", render(&ctx.settings_path, &ctx.settings)?);
    Ok(())
}

fn render(path: &Path, settings: &Settings) -> Result<String, CliError> {
    Ok(format!(
        "Settings file: {}\n{}",
        path.display(),
        settings.to_json_pretty()?
    ))
}
