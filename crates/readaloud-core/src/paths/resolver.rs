//! All resolved paths captured in one struct, for the `paths` command.

use std::fmt;
use std::path::PathBuf;

use super::{
    PathError, bundled_voices_dir, catalog_path, current_engine_executable, data_root,
    resource_root, settings_path, voices_dir,
};

/// Snapshot of every location readaloud reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub data_root: PathBuf,
    pub resource_root: PathBuf,
    pub voices_dir: PathBuf,
    pub bundled_voices_dir: PathBuf,
    pub catalog: PathBuf,
    pub settings: PathBuf,
    /// `None` when the running platform has no engine row.
    pub engine: Option<PathBuf>,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self {
            data_root: data_root()?,
            resource_root: resource_root()?,
            voices_dir: voices_dir()?,
            bundled_voices_dir: bundled_voices_dir()?,
            catalog: catalog_path()?,
            settings: settings_path()?,
            engine: current_engine_executable().ok(),
        })
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "resource_root = {}", self.resource_root.display())?;
        writeln!(f, "voices_dir = {}", self.voices_dir.display())?;
        writeln!(f, "bundled_voices_dir = {}", self.bundled_voices_dir.display())?;
        writeln!(f, "catalog = {}", self.catalog.display())?;
        writeln!(f, "settings = {}", self.settings.display())?;
        match &self.engine {
            Some(path) => write!(f, "engine = {}", path.display()),
            None => write!(f, "engine = (unsupported platform)"),
        }
    }
}
