//! Engine directory preparation.
//!
//! Archives and extension packages drop the executable bit and the shared
//! library symlinks the engine's loader expects. `prepare_engine_dir` puts
//! them back. A failing symlink is logged and skipped so the others are
//! still attempted.

use std::io;
use std::path::Path;

use readaloud_core::paths::engine_dir;
use readaloud_core::{CoreError, PlatformSpec};
use tracing::{debug, info, warn};

/// What `prepare_engine_dir` changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// The executable bit was added to the synthesis binary.
    pub made_executable: bool,
    /// Symlinks that were created or repaired.
    pub fixed_links: Vec<String>,
    /// Symlinks that could not be repaired, with the reason.
    pub failed_links: Vec<(String, String)>,
}

impl SetupReport {
    pub fn is_clean(&self) -> bool {
        self.failed_links.is_empty()
    }
}

/// Prepare the running platform's engine directory under the resource root.
pub fn prepare_current_engine() -> Result<SetupReport, CoreError> {
    let spec = PlatformSpec::current()?;
    let dir = engine_dir(spec)?;
    prepare_engine_dir(&dir, spec)
}

/// Make the synthesis binary executable and repair missing or broken
/// library symlinks in `dir`.
pub fn prepare_engine_dir(dir: &Path, spec: &PlatformSpec) -> Result<SetupReport, CoreError> {
    let executable = dir.join(spec.executable);
    if !executable.is_file() {
        return Err(CoreError::ExecutableNotFound(executable));
    }

    let mut report = SetupReport {
        made_executable: ensure_executable(&executable)?,
        ..SetupReport::default()
    };

    for link in spec.library_links {
        let link_path = dir.join(link.link);
        if link_path.exists() {
            debug!(link = link.link, "Library link already resolves");
            continue;
        }
        match repair_link(dir, link.link, link.target) {
            Ok(()) => {
                info!(link = link.link, target = link.target, "Repaired library link");
                report.fixed_links.push(link.link.to_string());
            }
            Err(e) => {
                warn!(link = link.link, target = link.target, error = %e, "Failed to repair library link");
                report.failed_links.push((link.link.to_string(), e.to_string()));
            }
        }
    }

    Ok(report)
}

#[cfg(unix)]
fn ensure_executable(path: &Path) -> io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    let mode = permissions.mode();
    if mode & 0o111 == 0o111 {
        return Ok(false);
    }
    permissions.set_mode(mode | 0o755);
    std::fs::set_permissions(path, permissions)?;
    Ok(true)
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) -> io::Result<bool> {
    Ok(false)
}

#[cfg(unix)]
fn repair_link(dir: &Path, link: &str, target: &str) -> io::Result<()> {
    let target_path = dir.join(target);
    if !target_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("link target {target} is missing"),
        ));
    }

    let link_path = dir.join(link);
    // A dangling link still occupies the name.
    if link_path.symlink_metadata().is_ok() {
        std::fs::remove_file(&link_path)?;
    }
    std::os::unix::fs::symlink(target, &link_path)
}

#[cfg(not(unix))]
fn repair_link(_dir: &Path, _link: &str, _target: &str) -> io::Result<()> {
    Ok(())
}
