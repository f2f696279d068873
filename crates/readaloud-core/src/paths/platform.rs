//! Data and resource root detection.
//!
//! The data root holds user state (downloaded voices, settings, session
//! file). The resource root holds what ships with the application: the
//! synthesis engine binaries, bundled voices and the catalog lookup table.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Detect if we are running from the local repository.
///
/// Debug builds always resolve resources from the workspace they were built
/// in. Release builds only do so when the executable lives inside that
/// workspace (e.g. `target/release/readaloud`).
#[allow(clippy::unnecessary_wraps)] // Option is needed for release builds
pub(super) fn detect_local_repo() -> Option<PathBuf> {
    let repo_root = PathBuf::from(env!("READALOUD_REPO_ROOT"));

    #[cfg(debug_assertions)]
    {
        Some(repo_root)
    }

    #[cfg(not(debug_assertions))]
    {
        if !repo_root.join("Cargo.toml").exists() {
            return None;
        }

        let exe_path = env::current_exe().ok()?;
        let canonical_exe = exe_path.canonicalize().ok()?;
        let canonical_repo = repo_root.canonicalize().ok()?;
        canonical_exe
            .starts_with(&canonical_repo)
            .then_some(repo_root)
    }
}

/// Get the root directory for user data (voices, settings, session file).
///
/// Resolution order:
/// 1. `READALOUD_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/readaloud`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var("READALOUD_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("readaloud");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Get the root directory for shipped resources (engine, bundled voices, catalog).
///
/// Resolution order:
/// 1. `READALOUD_RESOURCE_DIR` environment variable
/// 2. Local repository (if running from source)
/// 3. Directory containing the running executable
/// 4. Falls back to data root
pub fn resource_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var("READALOUD_RESOURCE_DIR") {
        return Ok(PathBuf::from(path));
    }

    if let Some(repo) = detect_local_repo() {
        return Ok(repo.join("resources"));
    }

    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
    {
        return Ok(dir);
    }

    data_root()
}
