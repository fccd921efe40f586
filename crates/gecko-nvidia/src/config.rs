//! Public configuration for the NVIDIA catalog client.

use std::time::Duration;

/// NVIDIA's manual driver lookup service.
pub const DEFAULT_LOOKUP_URL: &str =
    "https://gfwsl.geforce.com/services_toolkit/services/com/nvidia/services/AjaxDriverService.php";

/// Base of the community-maintained GPU and OS identifier tables.
pub const DEFAULT_DATA_BASE_URL: &str =
    "https://raw.githubusercontent.com/ZenitH-AT/nvidia-data/main/";

/// Configuration for the NVIDIA catalog client.
///
/// # Example
///
/// ```
/// use gecko_nvidia::NvidiaClientConfig;
/// use std::time::Duration;
///
/// let config = NvidiaClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct NvidiaClientConfig {
    /// Driver lookup endpoint
    pub(crate) lookup_url: String,
    /// Directory URL holding `gpu-data.json` and `os-data.json`
    pub(crate) data_base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for NvidiaClientConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            user_agent: concat!("gecko/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl NvidiaClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver lookup endpoint.
    #[must_use]
    pub fn with_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_url = url.into();
        self
    }

    /// Set the base URL of the GPU/OS identifier tables.
    ///
    /// A trailing `/` is added if missing so the table file names resolve
    /// beneath it.
    #[must_use]
    pub fn with_data_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.data_base_url = url;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
