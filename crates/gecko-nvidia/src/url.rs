//! URL construction for the catalog endpoints.

use url::Url;

pub const GPU_TABLE_FILE: &str = "gpu-data.json";
pub const OS_TABLE_FILE: &str = "os-data.json";

/// URL of a table file beneath `base` (which must end in `/`).
pub fn table_url(base: &Url, file: &str) -> Result<Url, url::ParseError> {
    base.join(file)
}

/// Manual driver lookup for one GPU/OS pair.
///
/// `timestamp` (Unix seconds) is sent as `ts` to defeat intermediary caches.
pub fn lookup_url(base: &Url, gpu_id: &str, os_id: &str, timestamp: i64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("func", "DriverManualLookup")
        .append_pair("pfid", gpu_id)
        .append_pair("osID", os_id)
        .append_pair("dch", "1")
        .append_pair("ts", &timestamp.to_string());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let base =
            Url::parse("https://raw.githubusercontent.com/ZenitH-AT/nvidia-data/main/").unwrap();
        assert_eq!(
            table_url(&base, GPU_TABLE_FILE).unwrap().as_str(),
            "https://raw.githubusercontent.com/ZenitH-AT/nvidia-data/main/gpu-data.json"
        );
    }

    #[test]
    fn test_lookup_url_params() {
        let base = Url::parse("https://gfwsl.geforce.com/services/AjaxDriverService.php").unwrap();
        let url = lookup_url(&base, "1095", "57", 1_760_000_000);

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("func".into(), "DriverManualLookup".into()),
                ("pfid".into(), "1095".into()),
                ("osID".into(), "57".into()),
                ("dch".into(), "1".into()),
                ("ts".into(), "1760000000".into()),
            ]
        );
    }
}
