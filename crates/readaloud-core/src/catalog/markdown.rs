//! Markdown voice list parser.
//!
//! Recognised line shapes, everything else is skipped:
//!
//! ```text
//! * English (en_US)
//!     * amy
//!         * medium - [[model](https://…/en_US-amy-medium.onnx)] [[config](https://…/en_US-amy-medium.onnx.json)]
//! ```
//!
//! Voice lines attach to the most recent language, quality lines to the most
//! recent voice. A line with no open parent is dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::{VoiceAssets, VoiceCatalog};

static LANGUAGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s+(\S.*\([^()]+\))\s*$").expect("valid regex"));

static VOICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?: {4}|\t)\*\s+(\S+)\s*$").expect("valid regex")
});

static QUALITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?: {8}|\t\t)\*\s+(\S+)\s+-\s+\[\[model\]\(([^)\s]+)\)\]\s+\[\[config\]\(([^)\s]+)\)\]\s*$",
    )
    .expect("valid regex")
});

pub(super) fn parse(doc: &str) -> VoiceCatalog {
    let mut catalog = VoiceCatalog::default();
    let mut language: Option<String> = None;
    let mut voice: Option<String> = None;

    for line in doc.lines() {
        if let Some(caps) = QUALITY_LINE.captures(line) {
            let (Some(lang), Some(name)) = (&language, &voice) else {
                continue;
            };
            catalog.insert(
                lang,
                name,
                &caps[1],
                VoiceAssets {
                    model: caps[2].to_string(),
                    config: caps[3].to_string(),
                },
            );
        } else if let Some(caps) = VOICE_LINE.captures(line) {
            if let Some(lang) = &language {
                catalog.ensure_voice(lang, &caps[1]);
                voice = Some(caps[1].to_string());
            }
        } else if let Some(caps) = LANGUAGE_LINE.captures(line) {
            catalog.ensure_language(&caps[1]);
            language = Some(caps[1].to_string());
            voice = None;
        }
    }

    catalog
}
