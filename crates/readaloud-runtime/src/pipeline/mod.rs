//! Synthesis pipeline: text → synthesis engine → audio player.
//!
//! A session runs two OS processes. The engine's stdout is handed to the
//! player as its stdin, so audio flows between them without passing through
//! this process. At most one session is live per pipeline: a new request
//! preempts the previous one instead of queueing behind it.
//!
//! # Lifecycle
//! `Idle → Resolving → Spawning → Streaming → Completed | Failed`, observable
//! through [`SpeechPipeline::subscribe`].

mod engine;
mod state;
mod supervisor;

pub use engine::EngineCommand;
pub use state::{PipelineState, SessionOutcome};

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use readaloud_core::{CoreError, ProcessRole};
use tokio::io::AsyncWriteExt;
use tokio::process::Child;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::pidfile::{RecordedProcess, SessionRecord, stop_recorded_session, write_session_file};
use supervisor::Supervisor;

/// Handle on the live session, held in the pipeline's slot.
struct ActiveSession {
    id: u64,
    cancel: CancellationToken,
    reaped: watch::Receiver<bool>,
}

impl ActiveSession {
    /// Cancel the session and wait until both processes are reaped.
    async fn shut_down(mut self) {
        self.cancel.cancel();
        // An Err means the supervisor is gone, which also implies reaped.
        let _ = self.reaped.wait_for(|reaped| *reaped).await;
    }
}

/// Runs text through the synthesis engine into the audio player.
pub struct SpeechPipeline {
    engine: Option<EngineCommand>,
    session_file: Option<PathBuf>,
    active: Mutex<Option<ActiveSession>>,
    next_id: AtomicU64,
    state: watch::Sender<PipelineState>,
}

impl Default for SpeechPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechPipeline {
    /// Pipeline that resolves the engine from the running platform on every
    /// request and does not record sessions on disk.
    pub fn new() -> Self {
        Self {
            engine: None,
            session_file: None,
            active: Mutex::new(None),
            next_id: AtomicU64::new(1),
            state: watch::Sender::new(PipelineState::Idle),
        }
    }

    /// Use fixed engine commands instead of the platform table.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineCommand) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Record live sessions in `path` and preempt sessions other processes
    /// recorded there.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Whether a session is currently live.
    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Speak `text` with the voice model at `model`.
    ///
    /// Resolves once playback ends. Returns `Cancelled` when the session was
    /// stopped or preempted by a newer one.
    pub async fn speak(&self, text: &str, model: &Path) -> Result<SessionOutcome, CoreError> {
        self.set_state(PipelineState::Resolving);
        let engine = match &self.engine {
            Some(engine) => engine.clone(),
            None => match EngineCommand::current() {
                Ok(engine) => engine,
                Err(e) => return Err(self.fail(e)),
            },
        };

        let mut slot = self.active.lock().await;
        self.set_state(PipelineState::Spawning);

        if let Some(previous) = slot.take() {
            debug!(session = previous.id, "Preempting active session");
            previous.shut_down().await;
        }
        if let Some(path) = &self.session_file {
            if stop_recorded_session(path).await {
                info!("Preempted a session started by another process");
            }
        }

        if !engine.synthesis.is_file() {
            return Err(self.fail(CoreError::ExecutableNotFound(engine.synthesis)));
        }
        if !model.is_file() {
            return Err(self.fail(CoreError::VoiceFileNotFound(model.to_path_buf())));
        }

        let (mut synthesis, mut playback) = match spawn_pair(&engine, model).await {
            Ok(pair) => pair,
            Err(e) => return Err(self.fail(e)),
        };
        let stdin = synthesis.stdin.take();

        let session_file = self.record_session(&engine, &synthesis, &playback);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let (reaped_tx, reaped_rx) = watch::channel(false);
        let supervisor = Supervisor {
            synthesis,
            playback,
            cancel: cancel.clone(),
            reaped: reaped_tx,
            session_file,
        };
        let handle = tokio::spawn(supervisor.run());

        *slot = Some(ActiveSession {
            id,
            cancel,
            reaped: reaped_rx,
        });
        drop(slot);

        info!(session = id, model = %model.display(), chars = text.len(), "Session started");
        self.set_state(PipelineState::Streaming);

        if let Some(mut stdin) = stdin {
            // A write error means synthesis already exited; the supervisor reports why.
            if let Err(e) = write_text(&mut stdin, text).await {
                debug!(session = id, error = %e, "Text write to synthesis interrupted");
            }
        }

        let result = handle
            .await
            .unwrap_or_else(|e| Err(CoreError::Io(std::io::Error::other(e))));

        let still_current = {
            let mut slot = self.active.lock().await;
            if slot.as_ref().is_some_and(|s| s.id == id) {
                slot.take();
                true
            } else {
                false
            }
        };

        match &result {
            Ok(SessionOutcome::Completed) => {
                info!(session = id, "Session completed");
                if still_current {
                    self.set_state(PipelineState::Completed);
                }
            }
            Ok(SessionOutcome::Cancelled) => {
                info!(session = id, "Session cancelled");
                if still_current {
                    self.set_state(PipelineState::Idle);
                }
            }
            Err(e) => {
                warn!(session = id, error = %e, "Session failed");
                if still_current {
                    self.set_state(PipelineState::Failed);
                }
            }
        }
        result
    }

    /// Stop the live session, if any, and any session recorded by another
    /// process. Returns `true` when something was stopped.
    pub async fn stop(&self) -> bool {
        let session = self.active.lock().await.take();
        let mut stopped = false;
        if let Some(session) = session {
            debug!(session = session.id, "Stopping active session");
            session.shut_down().await;
            self.set_state(PipelineState::Idle);
            stopped = true;
        }
        if let Some(path) = &self.session_file {
            stopped |= stop_recorded_session(path).await;
        }
        stopped
    }

    fn record_session(
        &self,
        engine: &EngineCommand,
        synthesis: &Child,
        playback: &Child,
    ) -> Option<(PathBuf, SessionRecord)> {
        let path = self.session_file.clone()?;
        let record = SessionRecord {
            owner: std::process::id(),
            synthesis: RecordedProcess::new(
                synthesis.id()?,
                &engine.synthesis.to_string_lossy(),
            ),
            playback: RecordedProcess::new(playback.id()?, &engine.playback_program),
        };
        if let Err(e) = write_session_file(&path, &record) {
            warn!(path = %path.display(), error = %e, "Failed to write session file");
            return None;
        }
        Some((path, record))
    }

    fn set_state(&self, state: PipelineState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            debug!(from = %previous, to = %state, "Pipeline state");
        }
    }

    fn fail(&self, error: CoreError) -> CoreError {
        warn!(error = %error, "Pipeline failed");
        self.set_state(PipelineState::Failed);
        error
    }
}

/// Start synthesis, then playback fed from synthesis stdout.
///
/// If playback cannot start, synthesis is killed and reaped.
async fn spawn_pair(engine: &EngineCommand, model: &Path) -> Result<(Child, Child), CoreError> {
    let mut synthesis = engine
        .synthesis_command(model)
        .spawn()
        .map_err(|source| CoreError::ProcessSpawn {
            role: ProcessRole::Synthesis,
            program: engine.synthesis.display().to_string(),
            source,
        })?;

    let wired: Result<Stdio, std::io::Error> = match synthesis.stdout.take() {
        Some(stdout) => stdout.try_into(),
        None => Err(std::io::Error::other("synthesis stdout was not captured")),
    };

    let spawned = wired.and_then(|input| engine.playback_command(input).spawn());
    match spawned {
        Ok(playback) => Ok((synthesis, playback)),
        Err(source) => {
            let _ = synthesis.start_kill();
            let _ = synthesis.wait().await;
            Err(CoreError::ProcessSpawn {
                role: ProcessRole::Playback,
                program: engine.playback_program.clone(),
                source,
            })
        }
    }
}

async fn write_text(stdin: &mut tokio::process::ChildStdin, text: &str) -> std::io::Result<()> {
    stdin.write_all(text.as_bytes()).await?;
    stdin.flush().await?;
    stdin.shutdown().await
}
