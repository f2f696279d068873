//! Path utilities for readaloud data and resource locations.
//!
//! - Downloaded and bundled voice files
//! - Per-platform synthesis engine binaries
//! - Settings, catalog and session files
//!
//! OS-specific root detection is kept private in `platform`.

mod engine;
mod ensure;
mod error;
mod platform;
mod resolver;
mod state;
mod voices;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::PathError;

pub use platform::{data_root, resource_root};

pub use engine::{current_engine_executable, engine_dir, engine_executable, engines_root};

pub use voices::{
    bundled_voices_dir, config_file_in, find_model_in, model_file_in, voices_dir,
};

pub use state::{catalog_path, pids_dir, settings_path};

pub use ensure::ensure_directory;

pub use resolver::ResolvedPaths;
