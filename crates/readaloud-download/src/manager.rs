//! Voice asset manager: download, list and remove voices on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use readaloud_core::paths::{config_file_in, ensure_directory, model_file_in};
use readaloud_core::voice::MODEL_EXTENSION;
use readaloud_core::{CoreError, SettingsRepository, VoiceAssets, VoiceId};
use reqwest::Client;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::fetch::{ProgressCallback, build_client, fetch_to_file};

/// Files written by a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedVoice {
    pub id: VoiceId,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub bytes: u64,
}

/// What a removal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovedVoice {
    /// Number of files actually deleted (0, 1 or 2).
    pub files_removed: usize,
    /// The removed voice was selected and the selection was reset.
    pub selection_reset: bool,
}

/// Downloads voices into, and removes them from, one voices directory.
pub struct VoiceAssetManager {
    client: Client,
    voices_dir: PathBuf,
    settings: Arc<dyn SettingsRepository>,
}

impl VoiceAssetManager {
    /// Create a manager with the default download client.
    pub fn new(
        voices_dir: impl Into<PathBuf>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Result<Self, CoreError> {
        Ok(Self::with_client(build_client()?, voices_dir, settings))
    }

    /// Create a manager with a caller-supplied client.
    ///
    /// The client must have automatic redirects disabled.
    pub fn with_client(
        client: Client,
        voices_dir: impl Into<PathBuf>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            client,
            voices_dir: voices_dir.into(),
            settings,
        }
    }

    pub fn voices_dir(&self) -> &Path {
        &self.voices_dir
    }

    /// Download a voice's model and configuration files.
    ///
    /// The model is fetched first. If the config fetch fails, the model is
    /// removed again so the voice never appears installed without its config.
    pub async fn download(
        &self,
        id: &VoiceId,
        assets: &VoiceAssets,
        on_progress: ProgressCallback<'_>,
    ) -> Result<DownloadedVoice, CoreError> {
        ensure_directory(&self.voices_dir)?;

        let model_path = model_file_in(&self.voices_dir, id);
        let config_path = config_file_in(&self.voices_dir, id);

        let model_bytes = fetch_to_file(&self.client, &assets.model, &model_path, on_progress).await?;

        let config_bytes =
            match fetch_to_file(&self.client, &assets.config, &config_path, on_progress).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    if let Err(cleanup) = fs::remove_file(&model_path).await {
                        warn!(path = %model_path.display(), error = %cleanup, "Failed to remove model after config download failed");
                    }
                    return Err(e);
                }
            };

        info!(voice = %id, "Voice downloaded");
        Ok(DownloadedVoice {
            id: id.clone(),
            model_path,
            config_path,
            bytes: model_bytes + config_bytes,
        })
    }

    /// Delete a voice's files. Missing files are not an error.
    ///
    /// When the removed voice is the selected one, the selection is reset to
    /// the built-in default.
    pub async fn remove(&self, id: &VoiceId) -> Result<RemovedVoice, CoreError> {
        let mut outcome = RemovedVoice::default();

        for path in [
            model_file_in(&self.voices_dir, id),
            config_file_in(&self.voices_dir, id),
        ] {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Removed voice file");
                    outcome.files_removed += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let mut settings = self.settings.load().await?;
        if settings.voice_or_default() == *id && settings.selected_voice.is_some() {
            settings.selected_voice = Some(VoiceId::default_voice().to_string());
            self.settings.save(&settings).await?;
            outcome.selection_reset = true;
            info!(voice = %id, "Removed the selected voice; selection reset to default");
        }

        Ok(outcome)
    }

    /// Whether the model file for `id` is present.
    pub fn is_installed(&self, id: &VoiceId) -> bool {
        model_file_in(&self.voices_dir, id).is_file()
    }

    /// Voices with a model file in the voices directory, sorted by identifier.
    pub async fn installed(&self) -> Result<Vec<VoiceId>, CoreError> {
        installed_in(&self.voices_dir).await
    }
}

/// Voices with a model file in `dir`, sorted. A missing directory is empty.
pub async fn installed_in(dir: &Path) -> Result<Vec<VoiceId>, CoreError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let suffix = format!(".{MODEL_EXTENSION}");
    let mut ids = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(&suffix) else {
            continue;
        };
        if let Ok(id) = stem.parse::<VoiceId>() {
            ids.push(id);
        }
    }

    ids.sort();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use readaloud_core::{RepositoryError, Settings};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySettings(Mutex<Settings>);

    #[async_trait]
    impl SettingsRepository for MemorySettings {
        async fn load(&self) -> Result<Settings, RepositoryError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
            *self.0.lock().unwrap() = settings.clone();
            Ok(())
        }
    }

    fn manager(dir: &Path, selected: Option<&str>) -> (VoiceAssetManager, Arc<MemorySettings>) {
        let settings = Arc::new(MemorySettings(Mutex::new(Settings {
            selected_voice: selected.map(str::to_string),
        })));
        let manager = VoiceAssetManager::new(dir, settings.clone()).unwrap();
        (manager, settings)
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"data").unwrap();
    }

    #[tokio::test]
    async fn remove_missing_voice_is_noop() {
        let temp = tempfile::tempdir().unwrap();
        let (manager, _) = manager(temp.path(), None);
        let id: VoiceId = "en_US-amy-low".parse().unwrap();

        let outcome = manager.remove(&id).await.unwrap();
        assert_eq!(outcome, RemovedVoice::default());
    }

    #[tokio::test]
    async fn remove_deletes_both_files() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "en_US-amy-low.onnx");
        touch(temp.path(), "en_US-amy-low.onnx.json");
        let (manager, _) = manager(temp.path(), None);
        let id: VoiceId = "en_US-amy-low".parse().unwrap();

        let outcome = manager.remove(&id).await.unwrap();
        assert_eq!(outcome.files_removed, 2);
        assert!(!manager.is_installed(&id));
    }

    #[tokio::test]
    async fn removing_selected_voice_resets_selection() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "en_GB-alan-low.onnx");
        let (manager, settings) = manager(temp.path(), Some("en_GB-alan-low"));
        let id: VoiceId = "en_GB-alan-low".parse().unwrap();

        let outcome = manager.remove(&id).await.unwrap();
        assert!(outcome.selection_reset);
        let stored = settings.load().await.unwrap();
        assert!(stored.voice_or_default().is_default());
    }

    #[tokio::test]
    async fn removing_other_voice_keeps_selection() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "en_US-ryan-high.onnx");
        let (manager, settings) = manager(temp.path(), Some("en_GB-alan-low"));
        let id: VoiceId = "en_US-ryan-high".parse().unwrap();

        let outcome = manager.remove(&id).await.unwrap();
        assert!(!outcome.selection_reset);
        assert_eq!(
            settings.load().await.unwrap().selected_voice.as_deref(),
            Some("en_GB-alan-low")
        );
    }

    #[tokio::test]
    async fn installed_lists_models_only() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "en_US-ryan-high.onnx");
        touch(temp.path(), "en_US-ryan-high.onnx.json");
        touch(temp.path(), "en_GB-alan-low.onnx");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), "bad-name.onnx");

        let ids: Vec<String> = installed_in(temp.path())
            .await
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["en_GB-alan-low", "en_US-ryan-high"]);
    }

    #[tokio::test]
    async fn installed_in_missing_dir_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert!(installed_in(&temp.path().join("absent")).await.unwrap().is_empty());
    }
}
