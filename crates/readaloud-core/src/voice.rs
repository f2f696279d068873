//! Voice identifiers.
//!
//! A voice is addressed by `<language_code>-<voice_name>-<quality>`, e.g.
//! `en_US-amy-medium`. The identifier doubles as the basename of the model
//! file (`<id>.onnx`) and its configuration sidecar (`<id>.onnx.json`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Voice used when nothing is selected or the selected voice is missing.
pub const DEFAULT_VOICE: &str = "en_US-amy-medium";

/// Extension of the synthesis model file.
pub const MODEL_EXTENSION: &str = "onnx";

/// Extension of the model configuration sidecar.
pub const CONFIG_EXTENSION: &str = "onnx.json";

/// Identifier of a voice, unique per `(language code, voice, quality)`.
///
/// No part may be empty or contain `-`, a path separator or whitespace, so
/// the joined form can always be split back into the same three parts.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoiceId {
    language: String,
    name: String,
    quality: String,
}

impl VoiceId {
    /// Build an identifier from its three parts.
    pub fn new(language: &str, name: &str, quality: &str) -> Result<Self, CoreError> {
        for part in [language, name, quality] {
            if !is_valid_part(part) {
                return Err(CoreError::InvalidVoiceId(format!(
                    "{language}-{name}-{quality}"
                )));
            }
        }
        Ok(Self {
            language: language.to_string(),
            name: name.to_string(),
            quality: quality.to_string(),
        })
    }

    /// The built-in default voice.
    pub fn default_voice() -> Self {
        DEFAULT_VOICE
            .parse()
            .unwrap_or_else(|_| unreachable!("DEFAULT_VOICE is a valid identifier"))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// `<id>.onnx`
    pub fn model_file_name(&self) -> String {
        format!("{self}.{MODEL_EXTENSION}")
    }

    /// `<id>.onnx.json`
    pub fn config_file_name(&self) -> String {
        format!("{self}.{CONFIG_EXTENSION}")
    }

    pub fn is_default(&self) -> bool {
        self.to_string() == DEFAULT_VOICE
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && !part
            .chars()
            .any(|c| c == '-' || c == '/' || c == '\\' || c.is_whitespace())
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.language, self.name, self.quality)
    }
}

impl FromStr for VoiceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(language), Some(name), Some(quality), None) => {
                Self::new(language, name, quality)
            }
            _ => Err(CoreError::InvalidVoiceId(s.to_string())),
        }
    }
}

impl TryFrom<String> for VoiceId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VoiceId> for String {
    fn from(id: VoiceId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_parts_with_hyphens() {
        let id = VoiceId::new("en_US", "amy", "medium").unwrap();
        assert_eq!(id.to_string(), "en_US-amy-medium");
        assert_eq!(id.model_file_name(), "en_US-amy-medium.onnx");
        assert_eq!(id.config_file_name(), "en_US-amy-medium.onnx.json");
    }

    #[test]
    fn parse_recovers_parts() {
        let id: VoiceId = "de_DE-thorsten_emotional-x_low".parse().unwrap();
        assert_eq!(id.language(), "de_DE");
        assert_eq!(id.name(), "thorsten_emotional");
        assert_eq!(id.quality(), "x_low");
    }

    #[test]
    fn rejects_parts_that_would_collide() {
        // ("en", "a-b", "c") and ("en-a", "b", "c") would both join to "en-a-b-c".
        assert!(VoiceId::new("en", "a-b", "c").is_err());
        assert!(VoiceId::new("en-a", "b", "c").is_err());
        assert!("en-a-b-c".parse::<VoiceId>().is_err());
    }

    #[test]
    fn rejects_empty_and_path_like_parts() {
        assert!(VoiceId::new("", "amy", "medium").is_err());
        assert!(VoiceId::new("en_US", "../amy", "medium").is_err());
        assert!(VoiceId::new("en_US", "amy lee", "medium").is_err());
        assert!("en_US-amy".parse::<VoiceId>().is_err());
    }

    #[test]
    fn distinct_tuples_give_distinct_ids() {
        let tuples = [
            ("en_US", "amy", "low"),
            ("en_US", "amy", "medium"),
            ("en_GB", "amy", "medium"),
            ("en_US", "ryan", "medium"),
        ];
        let ids: std::collections::HashSet<String> = tuples
            .iter()
            .map(|(l, v, q)| VoiceId::new(l, v, q).unwrap().to_string())
            .collect();
        assert_eq!(ids.len(), tuples.len());
    }

    #[test]
    fn default_voice_is_valid() {
        let id = VoiceId::default_voice();
        assert!(id.is_default());
        assert_eq!(id.to_string(), DEFAULT_VOICE);
    }

    #[test]
    fn serde_uses_string_form() {
        let id = VoiceId::new("en_US", "amy", "medium").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"en_US-amy-medium\"");
        let back: VoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
