//! Voice catalog: language → voice → quality → asset URLs.
//!
//! The catalog is authored as a Markdown list (see [`VoiceCatalog::parse_markdown`])
//! and mirrored into a JSON lookup table that is read at runtime
//! ([`VoiceCatalog::load`]). Both forms have the same shape:
//!
//! ```json
//! {"English (en_US)": {"amy": {"medium": {"model": "…", "config": "…"}}}}
//! ```
//!
//! Keys are kept exactly as written and in document order.

mod markdown;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::voice::VoiceId;

/// Remote locations of one voice's files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAssets {
    /// URL of the `.onnx` model.
    pub model: String,
    /// URL of the `.onnx.json` configuration sidecar.
    pub config: String,
}

type QualityMap = IndexMap<String, VoiceAssets>;
type VoiceMap = IndexMap<String, QualityMap>;

/// Three-level voice catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceCatalog {
    languages: IndexMap<String, VoiceMap>,
}

/// One flattened catalog row with its derived identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub language: &'a str,
    pub voice: &'a str,
    pub quality: &'a str,
    pub assets: &'a VoiceAssets,
    pub id: VoiceId,
}

impl VoiceCatalog {
    /// Parse the Markdown voice list. Unrecognised lines are ignored.
    pub fn parse_markdown(doc: &str) -> Self {
        markdown::parse(doc)
    }

    /// Parse the JSON lookup table.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::CatalogUnavailable(e.to_string()))
    }

    /// Read the JSON lookup table from disk.
    ///
    /// A missing or malformed file yields `CatalogUnavailable`; there is no
    /// partially loaded catalog.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::CatalogUnavailable(format!("{}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&json).map_err(|e| match e {
            CoreError::CatalogUnavailable(reason) => {
                CoreError::CatalogUnavailable(format!("{}: {reason}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            languages = catalog.languages.len(),
            "Loaded voice catalog"
        );
        Ok(catalog)
    }

    /// Serialize to the JSON lookup table format.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::CatalogUnavailable(e.to_string()))
    }

    /// The catalog as a JSON value.
    pub fn to_json_value(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(self).map_err(|e| CoreError::CatalogUnavailable(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Language labels, e.g. `English (en_US)`.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Voice names under a language label.
    pub fn voices<'a>(&'a self, language: &str) -> impl Iterator<Item = &'a str> {
        self.languages
            .get(language)
            .into_iter()
            .flat_map(|voices| voices.keys().map(String::as_str))
    }

    /// Quality tiers under a voice.
    pub fn qualities<'a>(&'a self, language: &str, voice: &str) -> impl Iterator<Item = &'a str> {
        self.languages
            .get(language)
            .and_then(|voices| voices.get(voice))
            .into_iter()
            .flat_map(|qualities| qualities.keys().map(String::as_str))
    }

    pub fn assets(&self, language: &str, voice: &str, quality: &str) -> Option<&VoiceAssets> {
        self.languages.get(language)?.get(voice)?.get(quality)
    }

    /// Every row whose parts form a valid [`VoiceId`].
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.languages.iter().flat_map(|(language, voices)| {
            voices.iter().flat_map(move |(voice, qualities)| {
                qualities.iter().filter_map(move |(quality, assets)| {
                    let code = language_code(language)?;
                    let id = VoiceId::new(code, voice, quality).ok()?;
                    Some(CatalogEntry {
                        language,
                        voice,
                        quality,
                        assets,
                        id,
                    })
                })
            })
        })
    }

    /// Find the row for an identifier.
    pub fn find(&self, id: &VoiceId) -> Option<CatalogEntry<'_>> {
        self.entries().find(|entry| entry.id == *id)
    }

    fn ensure_language(&mut self, language: &str) -> &mut VoiceMap {
        self.languages.entry(language.to_string()).or_default()
    }

    fn ensure_voice(&mut self, language: &str, voice: &str) -> &mut QualityMap {
        self.ensure_language(language)
            .entry(voice.to_string())
            .or_default()
    }

    fn insert(&mut self, language: &str, voice: &str, quality: &str, assets: VoiceAssets) {
        self.ensure_voice(language, voice)
            .insert(quality.to_string(), assets);
    }
}

/// Extract the language code from a label such as `English (en_US)`.
///
/// Uses the last parenthesized group; surrounding backticks are stripped.
pub fn language_code(label: &str) -> Option<&str> {
    let open = label.rfind('(')?;
    let close = label[open..].find(')')? + open;
    let code = label[open + 1..close].trim().trim_matches('`');
    (!code.is_empty()).then_some(code)
}
