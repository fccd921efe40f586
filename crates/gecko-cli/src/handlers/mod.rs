//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that call the core services on the context and format
//!   the result for the terminal

pub mod check;
pub mod config;
pub mod update;
pub mod watch;
