//! NVIDIA catalog client.
//!
//! Generic over the HTTP backend so tests can substitute canned JSON. Use
//! [`DefaultNvidiaClient`] in production and interact with it through
//! `DriverCatalogPort`.

mod lookup;
mod tables;

use url::Url;

use crate::config::NvidiaClientConfig;
use crate::error::NvidiaResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Default client using the reqwest HTTP backend.
pub type DefaultNvidiaClient = NvidiaClient<ReqwestBackend>;

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    pub lookup: Url,
    pub data_base: Url,
}

impl Endpoints {
    fn from_config(config: &NvidiaClientConfig) -> NvidiaResult<Self> {
        Ok(Self {
            lookup: Url::parse(&config.lookup_url)?,
            data_base: Url::parse(&config.data_base_url)?,
        })
    }
}

/// Client for the NVIDIA identifier tables and driver lookup.
pub struct NvidiaClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) endpoints: Endpoints,
}

impl DefaultNvidiaClient {
    /// Create a client for `config`.
    ///
    /// Fails if a configured URL does not parse or the HTTP client cannot be
    /// built (e.g. no TLS backend).
    pub fn new(config: &NvidiaClientConfig) -> Result<Self, gecko_core::CatalogError> {
        let build = || -> NvidiaResult<Self> {
            Ok(Self {
                backend: ReqwestBackend::new(config)?,
                endpoints: Endpoints::from_config(config)?,
            })
        };
        build().map_err(crate::port::map_error)
    }
}

impl<B: HttpBackend> NvidiaClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &NvidiaClientConfig, backend: B) -> Self {
        Self {
            backend,
            endpoints: Endpoints::from_config(config).unwrap(),
        }
    }
}
