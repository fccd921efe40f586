//! Driver download candidates returned by the NVIDIA catalog.

use serde::{Deserialize, Serialize};
use url::Url;

/// A downloadable driver offered by the driver lookup service.
///
/// Created per successful lookup and consumed by the update flow; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverDownload {
    /// Direct URL of the installer.
    pub url: Url,
    /// Published version string, e.g. `592.00`.
    pub version: String,
    /// Release notes page, when the service provides a valid one.
    pub details_url: Option<Url>,
}

impl DriverDownload {
    pub fn new(url: Url, version: impl Into<String>, details_url: Option<Url>) -> Self {
        Self {
            url,
            version: version.into(),
            details_url,
        }
    }

    /// Installer file name (last path segment of the URL).
    pub fn file_name(&self) -> Option<String> {
        file_name_from_url(&self.url)
    }
}

/// Last non-empty path segment of a URL.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .map(ToString::to_string)
}
