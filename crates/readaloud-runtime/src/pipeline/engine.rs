//! The two commands a pipeline session runs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use readaloud_core::paths::engine_executable;
use readaloud_core::platform::{MODEL_FLAG, RAW_OUTPUT_FLAG};
use readaloud_core::{CoreError, PlatformSpec};
use tokio::process::Command;

/// Synthesis executable and playback invocation for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    /// Full path to the synthesis executable.
    pub synthesis: PathBuf,
    /// Playback program, looked up on `PATH`.
    pub playback_program: String,
    pub playback_args: Vec<String>,
}

impl EngineCommand {
    /// Engine commands for a platform row, with the executable under the
    /// resource root.
    pub fn for_platform(spec: &PlatformSpec) -> Result<Self, CoreError> {
        Ok(Self {
            synthesis: engine_executable(spec)?,
            playback_program: spec.playback.program.to_string(),
            playback_args: spec.playback.args.iter().map(ToString::to_string).collect(),
        })
    }

    /// Engine commands for the running platform.
    pub fn current() -> Result<Self, CoreError> {
        Self::for_platform(PlatformSpec::current()?)
    }

    /// `<exe> --model <model> --output-raw`, stdin and stdout piped.
    pub(crate) fn synthesis_command(&self, model: &Path) -> Command {
        let mut cmd = Command::new(&self.synthesis);
        cmd.arg(MODEL_FLAG)
            .arg(model)
            .arg(RAW_OUTPUT_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    /// Player command reading PCM from `input`.
    pub(crate) fn playback_command(&self, input: Stdio) -> Command {
        let mut cmd = Command::new(&self.playback_program);
        cmd.args(&self.playback_args)
            .stdin(input)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}
