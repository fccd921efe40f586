//! Domain model: versions, local hardware facts, and driver candidates.

mod driver;
mod hardware;
mod version;

pub use driver::{DriverDownload, file_name_from_url};
pub use hardware::{GpuInfo, OsInfo};
pub use version::{Version, VersionError};
