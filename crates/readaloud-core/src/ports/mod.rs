//! Port definitions (trait abstractions) for external systems.
//!
//! Ports use only domain types; implementations live in adapter crates.

pub mod settings_repository;
pub mod voice_picker;

use thiserror::Error;

pub use settings_repository::SettingsRepository;
pub use voice_picker::VoicePicker;

/// Storage-agnostic errors for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data could not be decoded.
    #[error("Corrupt stored data: {0}")]
    Serialization(String),
}
