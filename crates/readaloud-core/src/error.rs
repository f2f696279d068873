//! Domain error type shared by every readaloud crate.
//!
//! Every public operation returns `CoreError`; adapters turn it into a single
//! user-facing message. Nothing here is retried automatically.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;
use crate::ports::RepositoryError;

/// Which half of the synthesis pipeline a process error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    Synthesis,
    Playback,
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthesis => write!(f, "synthesis"),
            Self::Playback => write!(f, "playback"),
        }
    }
}

/// Errors surfaced by catalog, download and pipeline operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog lookup table is missing or malformed.
    #[error("Voice catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No platform row for this OS / CPU architecture.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The synthesis executable is not on disk.
    #[error("Synthesis executable not found at {0}")]
    ExecutableNotFound(PathBuf),

    /// The selected voice's model file is not on disk.
    #[error("Voice model not found at {0}")]
    VoiceFileNotFound(PathBuf),

    /// A download returned a non-success HTTP status.
    #[error("Download of {url} failed with HTTP status {status}")]
    DownloadFailed { url: String, status: u16 },

    /// A download finished but produced an empty file.
    #[error("Download produced an empty file: {0}")]
    EmptyDownload(PathBuf),

    /// A pipeline process could not be started.
    #[error("Failed to start {role} process '{program}': {source}")]
    ProcessSpawn {
        role: ProcessRole,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A pipeline process exited with a non-zero status.
    #[error("The {role} process exited with code {code}")]
    ProcessExit { role: ProcessRole, code: i32 },

    /// A string is not a valid `<lang>-<voice>-<quality>` identifier.
    #[error("Invalid voice identifier: {0}")]
    InvalidVoiceId(String),

    /// The identifier is well formed but not in the catalog.
    #[error("Voice {0} is not in the catalog")]
    UnknownVoice(String),

    /// Transport-level HTTP failure (connection, TLS, body read).
    #[error("HTTP error for {url}: {reason}")]
    Http { url: String, reason: String },

    /// The HTTP client could not be constructed (TLS backend, proxy config).
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// The error for the platform this binary is running on.
    pub fn unsupported_current_platform() -> Self {
        Self::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_process() {
        let err = CoreError::ProcessExit {
            role: ProcessRole::Playback,
            code: 1,
        };
        assert_eq!(err.to_string(), "The playback process exited with code 1");
    }

    #[test]
    fn download_failed_carries_status() {
        let err = CoreError::DownloadFailed {
            url: "https://example.com/a.onnx".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn client_setup_failure_names_no_url() {
        let err = CoreError::HttpClient("no TLS backend".to_string());
        assert_eq!(err.to_string(), "Failed to build HTTP client: no TLS backend");
    }
}
