//! JSON-file implementation of `SettingsRepository`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use readaloud_core::{RepositoryError, Settings, SettingsRepository, validate_settings};
use tokio::fs;
use tracing::debug;

/// Settings stored as a JSON object in one file.
#[derive(Debug, Clone)]
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };
        serde_json::from_str(&json).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        validate_settings(settings).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, json)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
