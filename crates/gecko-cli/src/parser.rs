//! Main CLI parser and top-level argument handling.
//!
//! Global options apply to every subcommand. The probe overrides let the
//! binary run on machines without an NVIDIA card (or pretend to be a
//! different one).

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;
use crate::system_probe::ProbeOverrides;

/// Command-line interface for the NVIDIA driver update checker.
#[derive(Debug, Parser)]
#[command(name = "gecko")]
#[command(about = "Check for, download, and install NVIDIA GPU driver updates")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long = "config", global = true, env = "GECKO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to save downloaded installers into
    #[arg(long = "download-dir", global = true)]
    pub download_dir: Option<PathBuf>,

    /// Report this GPU name instead of probing (e.g. "NVIDIA GeForce RTX 4080")
    #[arg(long = "gpu-name", global = true)]
    pub gpu_name: Option<String>,

    /// Report this Windows driver version instead of probing (e.g. "32.0.15.9144")
    #[arg(long = "driver-version", global = true)]
    pub driver_version: Option<String>,

    /// Report this OS version instead of probing (e.g. "10.0")
    #[arg(long = "os-version", global = true)]
    pub os_version: Option<String>,

    /// Report a 32-bit operating system
    #[arg(long = "os-32bit", global = true)]
    pub os_32bit: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The system-probe overrides given on the command line.
    pub fn probe_overrides(&self) -> ProbeOverrides {
        ProbeOverrides {
            gpu_name: self.gpu_name.clone(),
            driver_version: self.driver_version.clone(),
            os_version: self.os_version.clone(),
            os_32bit: self.os_32bit,
        }
    }
}
