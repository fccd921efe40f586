//! `DriverCatalogPort` implementation for `NvidiaClient`.

use async_trait::async_trait;
use gecko_core::{CatalogError, CatalogResult, DriverCatalogPort, DriverDownload, OsInfo};

use crate::client::NvidiaClient;
use crate::error::NvidiaError;
use crate::http::HttpBackend;

/// Convert internal `NvidiaError` to core `CatalogError`.
pub(crate) fn map_error(err: NvidiaError) -> CatalogError {
    match err {
        NvidiaError::RequestFailed { status, url } => CatalogError::Status { url, status },
        NvidiaError::InvalidResponse { message } => CatalogError::Decode { message },
        NvidiaError::Network(e) => {
            if e.is_decode() {
                CatalogError::Decode {
                    message: e.to_string(),
                }
            } else {
                CatalogError::Network {
                    message: e.to_string(),
                }
            }
        }
        NvidiaError::InvalidUrl(e) => CatalogError::InvalidUrl { url: e.to_string() },
        NvidiaError::JsonParse(e) => CatalogError::Decode {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend> DriverCatalogPort for NvidiaClient<B> {
    async fn gpu_id(&self, formatted_name: &str) -> CatalogResult<Option<String>> {
        self.find_gpu_id(formatted_name).await.map_err(map_error)
    }

    async fn os_id(&self, os: &OsInfo) -> CatalogResult<Option<String>> {
        self.find_os_id(os).await.map_err(map_error)
    }

    async fn lookup(&self, gpu_id: &str, os_id: &str) -> CatalogResult<Vec<DriverDownload>> {
        self.lookup_drivers(gpu_id, os_id).await.map_err(map_error)
    }
}
