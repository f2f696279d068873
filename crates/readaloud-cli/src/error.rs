//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and the single user-facing message printed
//! on failure.

use readaloud_core::CoreError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error without a more specific category.
    #[error("{0}")]
    Core(String),

    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A required file is missing (engine binary, voice model).
    #[error("{0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration, catalog or settings error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Download or HTTP error.
    #[error("Download error: {0}")]
    Network(String),

    /// This machine cannot run the pipeline.
    #[error("{0}")]
    Unsupported(String),

    /// Synthesis or playback process error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Unsupported(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Network(_) => 76,     // EX_PROTOCOL
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidVoiceId(_) | CoreError::UnknownVoice(_) => Self::Arguments(message),
            CoreError::ExecutableNotFound(_) | CoreError::VoiceFileNotFound(_) => {
                Self::NotFound(message)
            }
            CoreError::UnsupportedPlatform { .. } => Self::Unsupported(message),
            CoreError::DownloadFailed { .. }
            | CoreError::EmptyDownload(_)
            | CoreError::Http { .. }
            | CoreError::HttpClient(_) => Self::Network(message),
            CoreError::ProcessSpawn { .. } | CoreError::ProcessExit { .. } => Self::Process(message),
            CoreError::CatalogUnavailable(_)
            | CoreError::Path(_)
            | CoreError::Repository(_) => Self::Config(message),
            CoreError::Io(e) => Self::Io(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Core(format!("{err:#}"))
    }
}
