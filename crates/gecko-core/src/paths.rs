//! Filesystem locations: the data root, the settings file, and the default
//! download directory.
//!
//! Resolution honours `GECKO_DATA_DIR` before falling back to the platform
//! config directory (e.g. `~/.config/gecko`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "GECKO_DATA_DIR";

/// File name of the settings file inside the data root.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the platform config directory.
    #[error("Cannot determine system config directory")]
    NoConfigDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Root directory for gecko's own files, created if missing.
///
/// Resolution order:
/// 1. `GECKO_DATA_DIR` environment variable
/// 2. `<platform config dir>/gecko`
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var(DATA_DIR_ENV).ok(), dirs::config_dir())?;
    ensure_directory(&root)?;
    Ok(root)
}

/// Location of the settings file.
pub fn config_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CONFIG_FILE_NAME))
}

/// Directory installers are saved into when none is configured.
///
/// The platform downloads directory, or `<data root>/downloads` on systems
/// without one.
pub fn default_download_dir() -> Result<PathBuf, PathError> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(data_root()?.join("downloads")),
    }
}

/// Create `path` (and parents) if missing; fail if it exists as a file.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn resolve_data_root(
    override_dir: Option<String>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    config_dir
        .map(|dir| dir.join("gecko"))
        .ok_or(PathError::NoConfigDir)
}
