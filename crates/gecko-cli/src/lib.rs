//! The `gecko` command-line adapter.
//!
//! Owns everything platform-facing that the core leaves abstract: argument
//! parsing, the settings file, logging, probing the local GPU and OS, and
//! rendering notifications to the terminal. [`bootstrap()`] wires these into
//! the core services and the handlers drive them.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod config_file;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod opener;
pub mod parser;
pub mod presenter;
pub mod system_probe;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use config_file::{LoadedSettings, SettingsSource, load_or_init};
pub use error::CliError;
pub use parser::Cli;
