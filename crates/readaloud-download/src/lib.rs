//! Voice asset downloads for readaloud.
//!
//! Fetches a voice's model and configuration files over HTTP into the voices
//! directory, following redirects by hand, and removes them again.

pub mod fetch;
pub mod manager;

pub use fetch::{ProgressCallback, build_client, fetch_to_file, get_following_redirects, no_progress};
pub use manager::{DownloadedVoice, RemovedVoice, VoiceAssetManager, installed_in};
