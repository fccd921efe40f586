//! Wire types for the catalog endpoints.

use std::collections::HashMap;

use serde::Deserialize;

/// `gpu-data.json`: product name to product id, split by form factor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpuTable {
    #[serde(default)]
    pub desktop: HashMap<String, String>,
    #[serde(default)]
    pub notebook: HashMap<String, String>,
}

impl GpuTable {
    /// Product id for `name`, preferring desktop parts.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.desktop
            .get(name)
            .or_else(|| self.notebook.get(name))
            .map(String::as_str)
    }
}

/// One entry of `os-data.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsEntry {
    /// Catalog id, e.g. `57`.
    pub id: String,
    /// Version code, e.g. `10.0`.
    pub code: String,
    /// Human-readable name, e.g. `Windows 11 64-bit`.
    pub name: String,
}

/// Id of the first entry matching `code` whose name mentions `bitness`.
pub fn find_os_id<'a>(entries: &'a [OsEntry], code: &str, bitness: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.code == code && entry.name.contains(bitness))
        .map(|entry| entry.id.as_str())
}

/// Response of `AjaxDriverService.php?func=DriverManualLookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverLookupResponse {
    #[serde(rename = "Success", default)]
    pub success: String,
    #[serde(rename = "IDS", default)]
    pub downloads: Vec<DriverEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverEntry {
    #[serde(rename = "downloadInfo")]
    pub download_info: DownloadInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadInfo {
    #[serde(rename = "DownloadURL")]
    pub download_url: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "DetailsURL", default)]
    pub details_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gpu_table_prefers_desktop() {
        let table: GpuTable = serde_json::from_value(json!({
            "desktop": {"GeForce RTX 4090": "1095"},
            "notebook": {"GeForce RTX 4090": "1099", "GeForce RTX 4050 Laptop GPU": "1014"}
        }))
        .unwrap();

        assert_eq!(table.find("GeForce RTX 4090"), Some("1095"));
        assert_eq!(table.find("GeForce RTX 4050 Laptop GPU"), Some("1014"));
        assert_eq!(table.find("Radeon RX 7900"), None);
    }

    #[test]
    fn gpu_table_tolerates_missing_sections() {
        let table: GpuTable = serde_json::from_value(json!({"desktop": {"A": "1"}})).unwrap();
        assert_eq!(table.find("A"), Some("1"));
    }

    #[test]
    fn os_lookup_matches_code_and_bitness() {
        let entries: Vec<OsEntry> = serde_json::from_value(json!([
            {"id": "56", "code": "10.0", "name": "Windows 10 32-bit"},
            {"id": "57", "code": "10.0", "name": "Windows 10 64-bit"},
            {"id": "135", "code": "10.0", "name": "Windows 11"},
        ]))
        .unwrap();

        assert_eq!(find_os_id(&entries, "10.0", "64"), Some("57"));
        assert_eq!(find_os_id(&entries, "10.0", "32"), Some("56"));
        assert_eq!(find_os_id(&entries, "6.1", "64"), None);
    }

    #[test]
    fn lookup_response_decodes() {
        let response: DriverLookupResponse = serde_json::from_value(json!({
            "Success": "1",
            "IDS": [{"downloadInfo": {
                "DownloadURL": "https://us.download.nvidia.com/Windows/592.00/592.00-desktop.exe",
                "Version": "592.00",
                "DetailsURL": "https://www.nvidia.com/en-us/drivers/details/1/"
            }}]
        }))
        .unwrap();

        assert_eq!(response.success, "1");
        assert_eq!(response.downloads.len(), 1);
        assert_eq!(response.downloads[0].download_info.version, "592.00");
    }

    #[test]
    fn lookup_response_without_ids_is_empty() {
        let response: DriverLookupResponse =
            serde_json::from_value(json!({"Success": "0"})).unwrap();
        assert!(response.downloads.is_empty());
    }
}
