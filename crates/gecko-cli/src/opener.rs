//! Opening URLs and launching installers with the desktop's default handler.
//!
//! Both go through the `open` crate, which hands the target to the platform
//! API (`ShellExecuteW`, `open`, `xdg-open` and friends) as a single argument.

use std::io;
use std::path::Path;

use gecko_core::{LauncherPort, UrlOpenerPort};
use url::Url;

/// Opens release notes in the browser and starts downloaded installers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    pub const fn new() -> Self {
        Self
    }
}

impl UrlOpenerPort for SystemOpener {
    fn open(&self, url: &Url) -> io::Result<()> {
        tracing::debug!(target: "gecko.cli", %url, "Opening URL");
        open::that_detached(url.as_str())
    }
}

impl LauncherPort for SystemOpener {
    fn launch(&self, path: &Path) -> io::Result<()> {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("installer not found: {}", path.display()),
            ));
        }
        tracing::info!(target: "gecko.cli", path = %path.display(), "Launching installer");
        open::that_detached(path)
    }
}
