//! `ReadAloud`: the operations exposed to hosts (CLI, editor bridges).
//!
//! Wires the speech pipeline, the voice asset manager, the catalog and the
//! settings repository together. Interactive operations take a
//! [`VoicePicker`] so the host decides how choices are presented.

use std::path::PathBuf;
use std::sync::Arc;

use readaloud_core::paths::{
    bundled_voices_dir, catalog_path, find_model_in, model_file_in, settings_path, voices_dir,
};
use readaloud_core::{
    CoreError, SettingsRepository, VoiceCatalog, VoiceId, VoicePicker, language_code,
};
use readaloud_download::{
    DownloadedVoice, ProgressCallback, RemovedVoice, VoiceAssetManager, installed_in,
};
use tracing::{debug, info, warn};

use crate::pidfile::session_file_path;
use crate::pipeline::{EngineCommand, SessionOutcome, SpeechPipeline};
use crate::settings_store::JsonSettingsRepository;

/// Locations and overrides a [`ReadAloud`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadAloudConfig {
    /// Where downloads go and are removed from.
    pub voices_dir: PathBuf,
    /// Read-only voices shipped with the application, searched second.
    pub bundled_voices_dir: Option<PathBuf>,
    pub catalog_path: PathBuf,
    pub settings_path: PathBuf,
    /// Cross-process session file; `None` disables it.
    pub session_file: Option<PathBuf>,
    /// Fixed engine commands; `None` uses the platform table.
    pub engine: Option<EngineCommand>,
}

impl ReadAloudConfig {
    /// Resolve every location from the environment and platform defaults.
    pub fn from_environment() -> Result<Self, CoreError> {
        Ok(Self {
            voices_dir: voices_dir()?,
            bundled_voices_dir: Some(bundled_voices_dir()?),
            catalog_path: catalog_path()?,
            settings_path: settings_path()?,
            session_file: Some(session_file_path()?),
            engine: None,
        })
    }
}

/// Read-aloud service.
pub struct ReadAloud {
    pipeline: SpeechPipeline,
    assets: VoiceAssetManager,
    settings: Arc<dyn SettingsRepository>,
    catalog_path: PathBuf,
    bundled_voices_dir: Option<PathBuf>,
}

impl ReadAloud {
    /// Service with settings persisted at `config.settings_path`.
    pub fn new(config: ReadAloudConfig) -> Result<Self, CoreError> {
        let settings = Arc::new(JsonSettingsRepository::new(&config.settings_path));
        Self::with_settings(config, settings)
    }

    /// Service with a caller-supplied settings repository.
    pub fn with_settings(
        config: ReadAloudConfig,
        settings: Arc<dyn SettingsRepository>,
    ) -> Result<Self, CoreError> {
        let mut pipeline = SpeechPipeline::new();
        if let Some(engine) = config.engine {
            pipeline = pipeline.with_engine(engine);
        }
        if let Some(path) = config.session_file {
            pipeline = pipeline.with_session_file(path);
        }

        Ok(Self {
            pipeline,
            assets: VoiceAssetManager::new(config.voices_dir, Arc::clone(&settings))?,
            settings,
            catalog_path: config.catalog_path,
            bundled_voices_dir: config.bundled_voices_dir,
        })
    }

    /// Service for the current user and platform.
    pub fn from_environment() -> Result<Self, CoreError> {
        Self::new(ReadAloudConfig::from_environment()?)
    }

    pub fn pipeline(&self) -> &SpeechPipeline {
        &self.pipeline
    }

    pub fn assets(&self) -> &VoiceAssetManager {
        &self.assets
    }

    /// Load the catalog lookup table.
    pub fn catalog(&self) -> Result<VoiceCatalog, CoreError> {
        VoiceCatalog::load(&self.catalog_path)
    }

    /// The selected voice, or the default when none is stored.
    pub async fn selected_voice(&self) -> Result<VoiceId, CoreError> {
        Ok(self.settings.load().await?.voice_or_default())
    }

    /// Model file for `id`: a download if present, else a bundled copy,
    /// else the download location it would have.
    pub fn model_path(&self, id: &VoiceId) -> PathBuf {
        let downloads = self.assets.voices_dir();
        find_model_in(downloads, self.bundled_voices_dir.as_deref(), id)
            .unwrap_or_else(|| model_file_in(downloads, id))
    }

    /// Voice and model used for synthesis: the selected voice while its model
    /// is on disk, otherwise the built-in default.
    pub async fn effective_voice(&self) -> Result<(VoiceId, PathBuf), CoreError> {
        let selected = self.selected_voice().await?;
        let model = self.model_path(&selected);
        if model.is_file() || selected.is_default() {
            return Ok((selected, model));
        }

        let default = VoiceId::default_voice();
        warn!(
            voice = %selected,
            missing = %model.display(),
            fallback = %default,
            "Selected voice is not installed, using the default voice"
        );
        let model = self.model_path(&default);
        Ok((default, model))
    }

    /// Voices available locally (downloaded and bundled), sorted, no duplicates.
    pub async fn installed_voices(&self) -> Result<Vec<VoiceId>, CoreError> {
        let mut ids = self.assets.installed().await?;
        if let Some(dir) = &self.bundled_voices_dir {
            ids.extend(installed_in(dir).await?);
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    /// Speak `text` with the effective voice, preempting any live session.
    ///
    /// Fails with `VoiceFileNotFound` only when neither the selected voice nor
    /// the default voice is installed.
    pub async fn read_text(&self, text: &str) -> Result<SessionOutcome, CoreError> {
        let (voice, model) = self.effective_voice().await?;
        debug!(voice = %voice, model = %model.display(), "Reading text");
        self.pipeline.speak(text, &model).await
    }

    /// Stop playback. A no-op when nothing is playing.
    pub async fn stop_playback(&self) -> bool {
        self.pipeline.stop().await
    }

    /// Persist `id` as the selected voice. The voice must be available locally.
    pub async fn set_voice(&self, id: &VoiceId) -> Result<(), CoreError> {
        let model = self.model_path(id);
        if !model.is_file() {
            return Err(CoreError::VoiceFileNotFound(model));
        }
        let mut settings = self.settings.load().await?;
        settings.selected_voice = Some(id.to_string());
        self.settings.save(&settings).await?;
        info!(voice = %id, "Voice selected");
        Ok(())
    }

    /// Let the user pick among local voices and persist the choice.
    ///
    /// The default voice is always offered. `None` when the picker was dismissed.
    pub async fn select_voice(
        &self,
        picker: &dyn VoicePicker,
    ) -> Result<Option<VoiceId>, CoreError> {
        let mut voices = self.installed_voices().await?;
        let default = VoiceId::default_voice();
        if !voices.contains(&default) {
            voices.insert(0, default);
        }

        let labels: Vec<String> = voices.iter().map(ToString::to_string).collect();
        let Some(choice) = pick(picker, "Select a voice", &labels) else {
            return Ok(None);
        };
        let id = voices[choice].clone();

        let mut settings = self.settings.load().await?;
        settings.selected_voice = Some(id.to_string());
        self.settings.save(&settings).await?;
        info!(voice = %id, "Voice selected");
        Ok(Some(id))
    }

    /// Download a catalog voice by identifier.
    pub async fn download(
        &self,
        id: &VoiceId,
        on_progress: ProgressCallback<'_>,
    ) -> Result<DownloadedVoice, CoreError> {
        let catalog = self.catalog()?;
        let entry = catalog
            .find(id)
            .ok_or_else(|| CoreError::UnknownVoice(id.to_string()))?;
        self.assets.download(id, entry.assets, on_progress).await
    }

    /// Let the user pick language, voice and quality from the catalog, then
    /// download that voice.
    pub async fn download_voice(
        &self,
        picker: &dyn VoicePicker,
        on_progress: ProgressCallback<'_>,
    ) -> Result<Option<VoiceId>, CoreError> {
        let catalog = self.catalog()?;

        let languages: Vec<String> = catalog.languages().map(str::to_string).collect();
        let Some(language) = pick(picker, "Select a language", &languages) else {
            return Ok(None);
        };
        let language = &languages[language];

        let voices: Vec<String> = catalog.voices(language).map(str::to_string).collect();
        let Some(voice) = pick(picker, "Select a voice", &voices) else {
            return Ok(None);
        };
        let voice = &voices[voice];

        let qualities: Vec<String> = catalog
            .qualities(language, voice)
            .map(str::to_string)
            .collect();
        let Some(quality) = pick(picker, "Select a quality", &qualities) else {
            return Ok(None);
        };
        let quality = &qualities[quality];

        let code = language_code(language)
            .ok_or_else(|| CoreError::InvalidVoiceId(language.clone()))?;
        let id = VoiceId::new(code, voice, quality)?;
        let assets = catalog
            .assets(language, voice, quality)
            .ok_or_else(|| CoreError::UnknownVoice(id.to_string()))?;

        self.assets.download(&id, assets, on_progress).await?;
        Ok(Some(id))
    }

    /// Remove a downloaded voice by identifier.
    pub async fn remove(&self, id: &VoiceId) -> Result<RemovedVoice, CoreError> {
        self.assets.remove(id).await
    }

    /// Let the user pick a downloaded voice and remove it.
    ///
    /// Bundled voices are not offered. `None` when nothing is downloaded or
    /// the picker was dismissed.
    pub async fn remove_voice(
        &self,
        picker: &dyn VoicePicker,
    ) -> Result<Option<VoiceId>, CoreError> {
        let voices = self.assets.installed().await?;
        if voices.is_empty() {
            info!("No downloaded voices to remove");
            return Ok(None);
        }

        let labels: Vec<String> = voices.iter().map(ToString::to_string).collect();
        let Some(choice) = pick(picker, "Remove which voice?", &labels) else {
            return Ok(None);
        };
        let id = voices[choice].clone();
        self.assets.remove(&id).await?;
        Ok(Some(id))
    }
}

/// Ask the picker, ignoring out-of-range answers and empty option lists.
fn pick(picker: &dyn VoicePicker, title: &str, options: &[String]) -> Option<usize> {
    if options.is_empty() {
        return None;
    }
    picker.pick(title, options).filter(|i| *i < options.len())
}
