//! Composition root: builds the service from the environment and CLI overrides.

use std::path::PathBuf;

use readaloud_runtime::{ReadAloud, ReadAloudConfig};
use tracing::debug;

use crate::error::CliError;

/// CLI overrides applied on top of environment-derived locations.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub voices_dir: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Build the read-aloud service.
pub fn bootstrap(config: CliConfig) -> Result<ReadAloud, CliError> {
    let mut resolved = ReadAloudConfig::from_environment()?;
    if let Some(dir) = config.voices_dir {
        resolved.voices_dir = dir;
    }
    if let Some(path) = config.catalog {
        resolved.catalog_path = path;
    }
    debug!(?resolved, "Resolved service configuration");
    Ok(ReadAloud::new(resolved)?)
}
