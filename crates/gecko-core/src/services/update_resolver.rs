//! Update resolution: local hardware facts in, a driver candidate out.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{DriverDownload, Version, VersionError};
use crate::ports::{CatalogError, DriverCatalogPort, SystemInfoPort};

/// Why a resolution cycle produced no candidate without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No NVIDIA GPU was reported by the system.
    MissingGpu,
    /// The OS version could not be determined.
    MissingOs,
    /// The GPU name is not listed in the catalog's product tables.
    UnknownGpu { name: String },
    /// No catalog OS entry matches the host version and bitness.
    UnknownOs { code: String, bitness: &'static str },
    /// The lookup succeeded but listed no drivers.
    NoDrivers,
    /// A local or remote version string could not be parsed.
    MalformedVersion { value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGpu => write!(f, "no NVIDIA GPU detected"),
            Self::MissingOs => write!(f, "operating system version unavailable"),
            Self::UnknownGpu { name } => write!(f, "GPU '{name}' is not in the NVIDIA catalog"),
            Self::UnknownOs { code, bitness } => {
                write!(f, "no catalog entry for OS {code} ({bitness}-bit)")
            }
            Self::NoDrivers => write!(f, "the catalog listed no drivers"),
            Self::MalformedVersion { value } => write!(f, "cannot parse version '{value}'"),
        }
    }
}

/// Outcome of one resolution cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    /// A strictly newer driver is available.
    Available(DriverDownload),
    /// The installed driver is at least as new as the catalog's.
    UpToDate { installed: Version, latest: Version },
    /// The cycle could not reach a decision.
    Skipped(SkipReason),
}

impl UpdateCheck {
    /// The candidate, if any; collapses every other outcome to `None`.
    pub fn into_download(self) -> Option<DriverDownload> {
        match self {
            Self::Available(download) => Some(download),
            Self::UpToDate { .. } | Self::Skipped(_) => None,
        }
    }
}

/// Resolution failures worth surfacing to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// A catalog request failed (network, HTTP status, or decoding).
    #[error("Driver lookup failed: {0}")]
    Lookup(#[from] CatalogError),
}

/// Decides whether a newer driver exists for this machine.
///
/// Each call to [`fetch`](Self::fetch) is one attempt; there is no retry.
pub struct UpdateResolver {
    system: Arc<dyn SystemInfoPort>,
    catalog: Arc<dyn DriverCatalogPort>,
}

impl UpdateResolver {
    pub fn new(system: Arc<dyn SystemInfoPort>, catalog: Arc<dyn DriverCatalogPort>) -> Self {
        Self { system, catalog }
    }

    /// Run one resolution cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Lookup`] if any catalog request fails.
    /// Missing data and unparseable versions are reported as
    /// [`UpdateCheck::Skipped`] instead.
    pub async fn fetch(&self) -> Result<UpdateCheck, ResolutionError> {
        let Some(gpu) = self.system.current_gpu() else {
            return Ok(skip(SkipReason::MissingGpu));
        };
        let Some(os) = self.system.current_os() else {
            return Ok(skip(SkipReason::MissingOs));
        };

        let gpu_name = gpu.formatted_name();
        tracing::debug!(
            target: "gecko.resolver",
            gpu = %gpu_name,
            driver = %gpu.raw_version,
            os = %os.catalog_code(),
            bitness = os.bitness_tag(),
            "Resolving catalog identifiers"
        );

        let (gpu_id, os_id) = tokio::join!(self.catalog.gpu_id(&gpu_name), self.catalog.os_id(&os));

        let Some(gpu_id) = gpu_id? else {
            return Ok(skip(SkipReason::UnknownGpu { name: gpu_name }));
        };
        let Some(os_id) = os_id? else {
            return Ok(skip(SkipReason::UnknownOs {
                code: os.catalog_code(),
                bitness: os.bitness_tag(),
            }));
        };

        let downloads = self.catalog.lookup(&gpu_id, &os_id).await?;
        let Some(download) = downloads.into_iter().next() else {
            return Ok(skip(SkipReason::NoDrivers));
        };

        let latest = match Version::parse(&download.version) {
            Ok(version) => version,
            Err(e) => return Ok(malformed(&e, download.version)),
        };
        let local_raw = gpu.formatted_version();
        let installed = match Version::parse(&local_raw) {
            Ok(version) => version,
            Err(e) => return Ok(malformed(&e, local_raw)),
        };

        if latest.is_newer_than(&installed) {
            tracing::info!(
                target: "gecko.resolver",
                %installed,
                %latest,
                url = %download.url,
                "Newer driver available"
            );
            Ok(UpdateCheck::Available(download))
        } else {
            tracing::info!(target: "gecko.resolver", %installed, %latest, "Driver is up to date");
            Ok(UpdateCheck::UpToDate { installed, latest })
        }
    }
}

fn skip(reason: SkipReason) -> UpdateCheck {
    tracing::info!(target: "gecko.resolver", %reason, "Skipping update check");
    UpdateCheck::Skipped(reason)
}

fn malformed(error: &VersionError, value: String) -> UpdateCheck {
    tracing::warn!(target: "gecko.resolver", %error, "Cannot compare driver versions");
    skip(SkipReason::MalformedVersion { value })
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeCatalog, network_error};
    use super::*;
    use crate::domain::{GpuInfo, OsInfo};
    use crate::ports::CatalogResult;
    use crate::ports::system_info::MockSystemInfoPort;

    /// `raw_version` formats to e.g. `591.44` for `32.0.15.9144`.
    fn system(raw_version: &'static str) -> Arc<MockSystemInfoPort> {
        let mut mock = MockSystemInfoPort::new();
        mock.expect_current_gpu()
            .returning(move || Some(GpuInfo::new("NVIDIA GeForce RTX 3080", raw_version)));
        mock.expect_current_os()
            .returning(|| Some(OsInfo::new(Version::new(10, 0), true)));
        Arc::new(mock)
    }

    fn resolver(system: Arc<MockSystemInfoPort>, catalog: Arc<FakeCatalog>) -> UpdateResolver {
        UpdateResolver::new(system, catalog)
    }

    #[tokio::test]
    async fn newer_remote_is_available() {
        let catalog = Arc::new(FakeCatalog::offering("592.00"));
        let check = resolver(system("32.0.15.9144"), Arc::clone(&catalog))
            .fetch()
            .await
            .unwrap();

        let UpdateCheck::Available(download) = check else {
            panic!("update expected, got {check:?}");
        };
        assert_eq!(download.version, "592.00");
        assert_eq!(
            catalog.queried_gpu_names.lock().unwrap().as_slice(),
            ["GeForce RTX 3080"]
        );
    }

    #[tokio::test]
    async fn older_remote_is_up_to_date() {
        // local 592.00 (32.0.15.9200), remote 591.44
        let catalog = Arc::new(FakeCatalog::offering("591.44"));
        let check = resolver(system("32.0.15.9200"), catalog).fetch().await.unwrap();

        assert_eq!(
            check,
            UpdateCheck::UpToDate {
                installed: Version::new(592, 0),
                latest: Version::new(591, 44),
            }
        );
    }

    #[tokio::test]
    async fn equal_versions_are_not_an_update() {
        let catalog = Arc::new(FakeCatalog::offering("591.44"));
        let check = resolver(system("32.0.15.9144"), catalog).fetch().await.unwrap();
        assert!(
            matches!(check, UpdateCheck::UpToDate { .. }),
            "equal versions must not offer an update, got {check:?}"
        );
    }

    #[tokio::test]
    async fn missing_gpu_skips_without_lookup() {
        let mut mock = MockSystemInfoPort::new();
        mock.expect_current_gpu().returning(|| None);
        mock.expect_current_os().never();
        let catalog = Arc::new(FakeCatalog::offering("592.00"));

        let check = resolver(Arc::new(mock), Arc::clone(&catalog))
            .fetch()
            .await
            .unwrap();

        assert_eq!(check, UpdateCheck::Skipped(SkipReason::MissingGpu));
        assert_eq!(catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn missing_os_skips() {
        let mut mock = MockSystemInfoPort::new();
        mock.expect_current_gpu()
            .returning(|| Some(GpuInfo::new("NVIDIA GeForce RTX 3080", "32.0.15.9144")));
        mock.expect_current_os().returning(|| None);

        let check = resolver(Arc::new(mock), Arc::new(FakeCatalog::offering("592.00")))
            .fetch()
            .await
            .unwrap();
        assert_eq!(check, UpdateCheck::Skipped(SkipReason::MissingOs));
    }

    #[tokio::test]
    async fn unknown_gpu_skips() {
        let catalog = Arc::new(FakeCatalog::offering("592.00").with_gpu_id(Ok(None)));
        let check = resolver(system("32.0.15.9144"), Arc::clone(&catalog))
            .fetch()
            .await
            .unwrap();

        assert_eq!(
            check,
            UpdateCheck::Skipped(SkipReason::UnknownGpu {
                name: "GeForce RTX 3080".to_string()
            })
        );
        assert_eq!(catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn unknown_os_skips() {
        let catalog = Arc::new(FakeCatalog::offering("592.00").with_os_id(Ok(None)));
        let check = resolver(system("32.0.15.9144"), catalog).fetch().await.unwrap();

        assert_eq!(
            check,
            UpdateCheck::Skipped(SkipReason::UnknownOs {
                code: "10.0".to_string(),
                bitness: "64",
            })
        );
    }

    #[tokio::test]
    async fn empty_catalog_skips() {
        let catalog = Arc::new(FakeCatalog::offering("592.00").with_downloads(Ok(Vec::new())));
        let check = resolver(system("32.0.15.9144"), catalog).fetch().await.unwrap();
        assert_eq!(check, UpdateCheck::Skipped(SkipReason::NoDrivers));
    }

    #[tokio::test]
    async fn malformed_remote_version_skips() {
        let mut catalog = FakeCatalog::offering("592.00");
        if let Ok(downloads) = catalog.downloads.as_mut() {
            downloads[0].version = "592".to_string();
        }
        let check = resolver(system("32.0.15.9144"), Arc::new(catalog))
            .fetch()
            .await
            .unwrap();

        assert_eq!(
            check,
            UpdateCheck::Skipped(SkipReason::MalformedVersion {
                value: "592".to_string()
            })
        );
    }

    #[tokio::test]
    async fn malformed_local_version_skips() {
        // 1.2.3.456 formats to "56", which has no minor component
        let catalog = Arc::new(FakeCatalog::offering("592.00"));
        let check = resolver(system("1.2.3.456"), catalog).fetch().await.unwrap();

        assert_eq!(
            check,
            UpdateCheck::Skipped(SkipReason::MalformedVersion {
                value: "56".to_string()
            })
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error() {
        let catalog =
            Arc::new(FakeCatalog::offering("592.00").with_downloads(Err(network_error())));
        let err = resolver(system("32.0.15.9144"), catalog)
            .fetch()
            .await
            .unwrap_err();

        assert_eq!(err, ResolutionError::Lookup(network_error()));
    }

    #[tokio::test]
    async fn identifier_failure_is_an_error() {
        let catalog = Arc::new(FakeCatalog::offering("592.00").with_os_id(Err(network_error())));
        let result = resolver(system("32.0.15.9144"), Arc::clone(&catalog))
            .fetch()
            .await;

        assert!(matches!(result, Err(ResolutionError::Lookup(_))));
        assert_eq!(catalog.lookup_count(), 0);
    }

    /// Catalog whose GPU lookup only finishes once the OS lookup has started.
    struct InterlockedCatalog {
        inner: FakeCatalog,
        os_started: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl DriverCatalogPort for InterlockedCatalog {
        async fn gpu_id(&self, formatted_name: &str) -> CatalogResult<Option<String>> {
            self.os_started.notified().await;
            self.inner.gpu_id(formatted_name).await
        }

        async fn os_id(&self, os: &OsInfo) -> CatalogResult<Option<String>> {
            self.os_started.notify_one();
            self.inner.os_id(os).await
        }

        async fn lookup(&self, gpu_id: &str, os_id: &str) -> CatalogResult<Vec<DriverDownload>> {
            self.inner.lookup(gpu_id, os_id).await
        }
    }

    #[tokio::test]
    async fn identifier_lookups_run_concurrently() {
        let catalog = Arc::new(InterlockedCatalog {
            inner: FakeCatalog::offering("592.00"),
            os_started: tokio::sync::Notify::new(),
        });
        let resolver = UpdateResolver::new(system("32.0.15.9144"), catalog);

        let check = tokio::time::timeout(std::time::Duration::from_secs(5), resolver.fetch())
            .await
            .expect("GPU and OS lookups must not run one after the other")
            .unwrap();

        assert!(matches!(check, UpdateCheck::Available(_)));
    }

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::UnknownOs {
            code: "10.0".to_string(),
            bitness: "32",
        };
        assert_eq!(reason.to_string(), "no catalog entry for OS 10.0 (32-bit)");
    }
}
