//! Entry point for the `gecko` binary.
//!
//! Loads settings (they pick the log level), starts logging, bootstraps the
//! composition root, and dispatches to a handler inside the session span.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use gecko_cli::error::exit_code_for;
use gecko_cli::{Cli, CliConfig, Commands, bootstrap, handlers, load_or_init, logging};
use tracing::Instrument;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(target: "gecko.cli", error = %format!("{err:#}"), "Command failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => gecko_core::config_file_path().map_err(gecko_cli::CliError::from)?,
    };
    let loaded = load_or_init(&settings_path)?;

    let session = logging::init(cli.verbose, loaded.settings.log_level);
    async {
        loaded.report();

        let config = CliConfig {
            download_dir: cli.download_dir.clone(),
            auto_accept: command.auto_accept(),
            overrides: cli.probe_overrides(),
        };
        let ctx = bootstrap(config, loaded)?;

        match command {
            Commands::Check => handlers::check::execute(&ctx).await,
            Commands::Update { .. } => handlers::update::execute(&ctx).await,
            Commands::Watch { .. } => handlers::watch::execute(&ctx).await,
            Commands::Config => handlers::config::execute(&ctx),
        }
    }
    .instrument(session)
    .await
}
