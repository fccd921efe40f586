//! System information port for GPU and OS detection.
//!
//! Core owns the trait; the CLI owns the implementation (it shells out to
//! `nvidia-smi` and reads the host OS version).

use thiserror::Error;

use crate::domain::{GpuInfo, OsInfo};

/// Errors an adapter may hit while probing. The port itself reports absence
/// as `None`; adapters log these and degrade.
#[derive(Debug, Error)]
pub enum SystemInfoError {
    /// Failed to execute a probing command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The command ran but its output could not be understood.
    #[error("Unexpected output from {command}: {reason}")]
    UnexpectedOutput { command: String, reason: String },

    /// No NVIDIA GPU was reported.
    #[error("No NVIDIA GPU detected")]
    NoGpu,
}

/// Port for reading local hardware and OS facts.
///
/// Either value may be absent (no NVIDIA GPU, unknown OS); the resolver
/// treats absence as "skip this cycle", not as an error.
#[cfg_attr(test, mockall::automock)]
pub trait SystemInfoPort: Send + Sync {
    /// The installed NVIDIA GPU and its raw driver version string.
    fn current_gpu(&self) -> Option<GpuInfo>;

    /// The host operating system version and bitness.
    fn current_os(&self) -> Option<OsInfo>;
}
