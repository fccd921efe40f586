//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` if set, then `--verbose`, then the
//! configured [`LogLevel`]. Every run gets a `session` span carrying a fresh
//! id so interleaved runs of `gecko watch` can be told apart.

use gecko_core::LogLevel;
use tracing::Span;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool, level: LogLevel) -> String {
    if verbose {
        return "warn,gecko=debug".to_string();
    }
    match level {
        LogLevel::None => "off".to_string(),
        other => format!("gecko={}", other.as_filter()),
    }
}

fn env_filter(verbose: bool, level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)))
}

/// Install the global subscriber and return the session span.
///
/// Logs go to stderr so they do not interleave with prompts on stdout.
pub fn init(verbose: bool, level: LogLevel) -> Span {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, level))
        .with_writer(std::io::stderr)
        .init();

    let session = Uuid::new_v4();
    tracing::info_span!("session", id = %session)
}
