//! Locations of small state files under the data root.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, resource_root};

/// Persisted settings file (`<data_root>/settings.json`).
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("settings.json"))
}

/// Directory holding the session PID file.
pub fn pids_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("pids"))
}

/// Catalog lookup table.
///
/// `READALOUD_CATALOG` overrides the default `<resource_root>/voices.json`.
pub fn catalog_path() -> Result<PathBuf, PathError> {
    if let Ok(path) = std::env::var("READALOUD_CATALOG") {
        return Ok(PathBuf::from(path));
    }
    Ok(resource_root()?.join("voices.json"))
}
