//! Subcommands of the `gecko` binary.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the newest driver for this machine and print the result
    Check,

    /// Run the notification flow once: offer, download, and install
    Update {
        /// Accept every offer without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Re-run the update flow on the configured interval until Ctrl-C
    Watch {
        /// Accept every offer without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the effective settings and where they were loaded from
    Config,
}

impl Commands {
    /// Whether prompts should be answered automatically.
    pub const fn auto_accept(&self) -> bool {
        match self {
            Self::Update { yes } | Self::Watch { yes } => *yes,
            Self::Check | Self::Config => false,
        }
    }
}
