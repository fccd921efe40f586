//! GPU and OS identifier tables.

use gecko_core::OsInfo;

use super::NvidiaClient;
use crate::error::{NvidiaError, NvidiaResult};
use crate::http::HttpBackend;
use crate::models::{GpuTable, OsEntry, find_os_id};
use crate::url::{GPU_TABLE_FILE, OS_TABLE_FILE, table_url};

impl<B: HttpBackend> NvidiaClient<B> {
    /// Product id for a formatted GPU name (desktop table first).
    pub(crate) async fn find_gpu_id(&self, name: &str) -> NvidiaResult<Option<String>> {
        let url = table_url(&self.endpoints.data_base, GPU_TABLE_FILE)?;
        let table: GpuTable = self.backend.get_json(&url).await?;
        if table.desktop.is_empty() && table.notebook.is_empty() {
            return Err(NvidiaError::InvalidResponse {
                message: format!("{GPU_TABLE_FILE} lists no products"),
            });
        }

        let id = table.find(name).map(ToString::to_string);
        if id.is_none() {
            tracing::debug!(
                target: "gecko.catalog",
                gpu = %name,
                desktop = table.desktop.len(),
                notebook = table.notebook.len(),
                "GPU not listed"
            );
        }
        Ok(id)
    }

    /// OS id for the host version and bitness.
    pub(crate) async fn find_os_id(&self, os: &OsInfo) -> NvidiaResult<Option<String>> {
        let url = table_url(&self.endpoints.data_base, OS_TABLE_FILE)?;
        let entries: Vec<OsEntry> = self.backend.get_json(&url).await?;
        if entries.is_empty() {
            return Err(NvidiaError::InvalidResponse {
                message: format!("{OS_TABLE_FILE} lists no operating systems"),
            });
        }

        let code = os.catalog_code();
        Ok(find_os_id(&entries, &code, os.bitness_tag()).map(ToString::to_string))
    }
}
