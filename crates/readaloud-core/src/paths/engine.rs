//! Synthesis engine binary locations.
//!
//! Layout: `<resource_root>/piper/<os>_<arch>/<executable>`, with the
//! engine's shared libraries next to the executable.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::resource_root;
use crate::platform::PlatformSpec;

/// Root of all per-platform engine directories.
pub fn engines_root() -> Result<PathBuf, PathError> {
    Ok(resource_root()?.join("piper"))
}

/// Engine directory for a platform row.
pub fn engine_dir(spec: &PlatformSpec) -> Result<PathBuf, PathError> {
    Ok(engines_root()?.join(spec.dir_name))
}

/// Full path to the synthesis executable for a platform row.
pub fn engine_executable(spec: &PlatformSpec) -> Result<PathBuf, PathError> {
    Ok(engine_dir(spec)?.join(spec.executable))
}

/// Engine executable for the running platform.
pub fn current_engine_executable() -> Result<PathBuf, PathError> {
    let spec = PlatformSpec::current()
        .map_err(|e| PathError::UnknownPlatform(e.to_string()))?;
    engine_executable(spec)
}
