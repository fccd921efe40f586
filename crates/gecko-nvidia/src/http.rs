//! HTTP backend abstraction for the catalog endpoints.
//!
//! The production backend issues a single GET per call with
//! `Cache-Control: no-cache`, so the identifier tables are revalidated every
//! cycle. There is no retry; a failed cycle is simply tried again at the next
//! interval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::NvidiaClientConfig;
use crate::error::NvidiaResult;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Fetches and decodes JSON documents.
///
/// This is an implementation detail - external code should use the
/// `DriverCatalogPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> NvidiaResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &NvidiaClientConfig) -> NvidiaResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> NvidiaResult<T> {
        tracing::debug!(target: "gecko.catalog", %url, "GET");

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::error::NvidiaError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Decode from bytes so schema errors surface as JSON errors rather
        // than opaque transport errors.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::error::NvidiaError;
    use std::sync::Mutex;

    /// A fake HTTP backend that returns canned JSON by URL substring.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, serde_json::Value)>,
        failures: Vec<(String, u16)>,
        requested: Mutex<Vec<Url>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer URLs containing `url_contains` with `json`.
        pub fn with_response(mut self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses.push((url_contains.to_string(), json));
            self
        }

        /// Answer URLs containing `url_contains` with an HTTP error.
        pub fn with_status(mut self, url_contains: &str, status: u16) -> Self {
            self.failures.push((url_contains.to_string(), status));
            self
        }

        /// Every URL requested so far, in order.
        pub fn requested(&self) -> Vec<Url> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> NvidiaResult<T> {
            self.requested.lock().unwrap().push(url.clone());

            if let Some((_, status)) = self
                .failures
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
            {
                return Err(NvidiaError::RequestFailed {
                    status: *status,
                    url: url.to_string(),
                });
            }

            let json = self
                .responses
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, json)| json.clone())
                .ok_or_else(|| NvidiaError::RequestFailed {
                    status: 404,
                    url: url.to_string(),
                })?;

            Ok(serde_json::from_value(json)?)
        }
    }
}
