//! Core domain for readaloud: voice identifiers, the voice catalog, the
//! platform table, settings, paths and the error taxonomy shared by the
//! download, runtime and CLI crates.

pub mod catalog;
pub mod error;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod settings;
pub mod voice;

pub use catalog::{CatalogEntry, VoiceAssets, VoiceCatalog, language_code};
pub use error::{CoreError, ProcessRole};
pub use paths::{PathError, ResolvedPaths, data_root, resource_root};
pub use platform::{LibraryLink, PlaybackCommand, PlatformSpec};
pub use ports::{RepositoryError, SettingsRepository, VoicePicker};
pub use settings::{Settings, SettingsError, validate_settings};
pub use voice::{DEFAULT_VOICE, VoiceId};
