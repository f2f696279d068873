//! Command handlers.
//!
//! Handlers are thin wrappers that:
//! 1. Parse/validate CLI-specific input
//! 2. Call `ReadAloud` methods
//! 3. Format output for the terminal

pub mod catalog;
pub mod download;
pub mod paths;
pub mod read;
pub mod remove;
pub mod select;
pub mod setup;
pub mod stop;
pub mod voices;

use readaloud_core::VoiceId;

use crate::error::CliError;

/// Parse a voice identifier argument.
pub(crate) fn parse_voice(raw: &str) -> Result<VoiceId, CliError> {
    Ok(raw.trim().parse::<VoiceId>()?)
}
