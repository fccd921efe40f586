//! Driver manual lookup.

use gecko_core::DriverDownload;
use url::Url;

use super::NvidiaClient;
use crate::error::NvidiaResult;
use crate::http::HttpBackend;
use crate::models::{DownloadInfo, DriverLookupResponse};
use crate::url::lookup_url;

impl<B: HttpBackend> NvidiaClient<B> {
    /// The driver offered for a GPU/OS id pair.
    ///
    /// Only the first `IDS` entry is the service's candidate; later entries
    /// are ignored, so a malformed one cannot fail the lookup.
    pub(crate) async fn lookup_drivers(
        &self,
        gpu_id: &str,
        os_id: &str,
    ) -> NvidiaResult<Vec<DriverDownload>> {
        let url = lookup_url(
            &self.endpoints.lookup,
            gpu_id,
            os_id,
            chrono::Utc::now().timestamp(),
        );
        let response: DriverLookupResponse = self.backend.get_json(&url).await?;

        tracing::debug!(
            target: "gecko.catalog",
            success = %response.success,
            count = response.downloads.len(),
            "Driver lookup answered"
        );

        response
            .downloads
            .into_iter()
            .next()
            .map(|entry| to_driver_download(entry.download_info))
            .into_iter()
            .collect()
    }
}

fn to_driver_download(info: DownloadInfo) -> NvidiaResult<DriverDownload> {
    let url = Url::parse(&info.download_url)?;
    let details_url = info
        .details_url
        .as_deref()
        .and_then(|raw| Url::parse(raw).ok());
    Ok(DriverDownload::new(url, info.version, details_url))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{lookup_json, test_client};
    use crate::error::NvidiaError;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_lookup_maps_downloads() {
        let backend = FakeBackend::new().with_response(
            "DriverManualLookup",
            lookup_json("592.00", Some("https://www.nvidia.com/en-us/drivers/details/1/")),
        );
        let client = test_client(backend);

        let downloads = client.lookup_drivers("929", "57").await.unwrap();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].version, "592.00");
        assert!(downloads[0].details_url.is_some());
        assert_eq!(
            downloads[0].file_name().as_deref(),
            Some("592.00-desktop-win10-win11-64bit-international-dch-whql.exe")
        );
    }

    #[tokio::test]
    async fn test_lookup_sends_ids_and_timestamp() {
        let backend =
            FakeBackend::new().with_response("DriverManualLookup", lookup_json("592.00", None));
        let client = test_client(backend);

        client.lookup_drivers("929", "57").await.unwrap();

        let url = &client.backend.requested()[0];
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("pfid".into(), "929".into())));
        assert!(query.contains(&("osID".into(), "57".into())));
        assert!(query.contains(&("dch".into(), "1".into())));
        assert!(query.iter().any(|(k, v)| k == "ts" && v.parse::<i64>().is_ok()));
    }

    #[tokio::test]
    async fn test_unparseable_details_url_is_none() {
        let backend = FakeBackend::new()
            .with_response("DriverManualLookup", lookup_json("592.00", Some("not a url")));
        let downloads = test_client(backend).lookup_drivers("929", "57").await.unwrap();
        assert_eq!(downloads[0].details_url, None);
    }

    #[tokio::test]
    async fn test_missing_details_url_is_none() {
        let backend = FakeBackend::new().with_response(
            "DriverManualLookup",
            json!({"Success": "1", "IDS": [{"downloadInfo": {
                "DownloadURL": "https://example.com/driver.exe",
                "Version": "592.00"
            }}]}),
        );
        let downloads = test_client(backend).lookup_drivers("929", "57").await.unwrap();
        assert_eq!(downloads[0].details_url, None);
    }

    #[tokio::test]
    async fn test_only_first_entry_is_consulted() {
        let backend = FakeBackend::new().with_response(
            "DriverManualLookup",
            json!({"Success": "1", "IDS": [
                {"downloadInfo": {
                    "DownloadURL": "https://us.download.nvidia.com/Windows/592.00/592.00-desktop.exe",
                    "Version": "592.00"
                }},
                {"downloadInfo": {"DownloadURL": "", "Version": "591.44"}}
            ]}),
        );

        let downloads = test_client(backend).lookup_drivers("929", "57").await.unwrap();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].version, "592.00");
    }

    #[tokio::test]
    async fn test_empty_ids_yields_no_downloads() {
        let backend = FakeBackend::new().with_response(
            "DriverManualLookup",
            json!({"Success": "0", "IDS": []}),
        );
        let downloads = test_client(backend).lookup_drivers("929", "57").await.unwrap();
        assert!(downloads.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_download_url_fails() {
        let backend = FakeBackend::new().with_response(
            "DriverManualLookup",
            json!({"Success": "1", "IDS": [{"downloadInfo": {
                "DownloadURL": "relative/driver.exe",
                "Version": "592.00"
            }}]}),
        );
        let result = test_client(backend).lookup_drivers("929", "57").await;
        assert!(matches!(result, Err(NvidiaError::InvalidUrl(_))));
    }
}
