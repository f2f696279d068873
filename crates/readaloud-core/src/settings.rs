//! Settings domain types and validation.

use serde::{Deserialize, Serialize};

use crate::voice::VoiceId;

/// Persisted application settings.
///
/// Scoped globally (one file per user), not per project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Identifier of the voice used for synthesis.
    pub selected_voice: Option<String>,
}

impl Settings {
    /// The selected voice, or the built-in default when unset or malformed.
    pub fn voice_or_default(&self) -> VoiceId {
        self.selected_voice
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(VoiceId::default_voice)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Selected voice '{0}' is not a valid voice identifier")]
    InvalidSelectedVoice(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(raw) = &settings.selected_voice {
        if raw.parse::<VoiceId>().is_err() {
            return Err(SettingsError::InvalidSelectedVoice(raw.clone()));
        }
    }
    Ok(())
}
