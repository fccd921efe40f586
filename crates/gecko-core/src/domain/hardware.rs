//! Local GPU and operating system facts.
//!
//! These are snapshots produced by a [`SystemInfoPort`](crate::ports::SystemInfoPort)
//! implementation once per resolution attempt.

use serde::{Deserialize, Serialize};

use super::version::Version;

/// Number of leading digits Windows prefixes onto NVIDIA driver versions.
const DRIVER_VERSION_PREFIX_LEN: usize = 4;

/// Position of the decimal point in the NVIDIA-facing driver version.
const DRIVER_VERSION_MAJOR_LEN: usize = 3;

/// The primary display adapter as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    /// Adapter name, e.g. `NVIDIA GeForce RTX 4080`.
    pub raw_name: String,
    /// Windows driver version, e.g. `32.0.15.9144`.
    pub raw_version: String,
}

impl GpuInfo {
    pub fn new(raw_name: impl Into<String>, raw_version: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            raw_version: raw_version.into(),
        }
    }

    /// The name as keyed in the NVIDIA GPU table (vendor prefix removed).
    ///
    /// `NVIDIA GeForce RTX 4080` becomes `GeForce RTX 4080`.
    pub fn formatted_name(&self) -> String {
        self.raw_name.replace("NVIDIA", "").trim().to_string()
    }

    /// The driver version in NVIDIA's public `major.minor` form.
    ///
    /// Dots are stripped, the first four digits dropped, and a dot inserted
    /// after the next three: `32.0.15.9144` -> `59144` -> `591.44`. A
    /// remainder shorter than three characters is returned as-is.
    pub fn formatted_version(&self) -> String {
        let digits: String = self
            .raw_version
            .chars()
            .filter(|c| *c != '.')
            .skip(DRIVER_VERSION_PREFIX_LEN)
            .collect();

        if digits.chars().count() < DRIVER_VERSION_MAJOR_LEN {
            return digits;
        }

        let major: String = digits.chars().take(DRIVER_VERSION_MAJOR_LEN).collect();
        let minor: String = digits.chars().skip(DRIVER_VERSION_MAJOR_LEN).collect();
        format!("{major}.{minor}")
    }
}

/// Operating system version and bitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    /// Kernel version, e.g. `10.0` for Windows 10 and 11.
    pub version: Version,
    /// Whether the native architecture is 64-bit.
    pub is_64_bit: bool,
}

impl OsInfo {
    pub const fn new(version: Version, is_64_bit: bool) -> Self {
        Self { version, is_64_bit }
    }

    /// The `code` this OS is listed under in the OS catalog.
    pub fn catalog_code(&self) -> String {
        self.version.to_string()
    }

    /// The bitness tag that appears in catalog entry names.
    pub const fn bitness_tag(&self) -> &'static str {
        if self.is_64_bit { "64" } else { "32" }
    }
}
