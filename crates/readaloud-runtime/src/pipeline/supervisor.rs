//! Per-session task owning both child processes.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use readaloud_core::{CoreError, ProcessRole};
use tokio::process::Child;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::state::SessionOutcome;
use crate::pidfile::{SessionRecord, clear_session_file};
use crate::process::terminate_child;

/// Time a process gets to exit after SIGTERM.
const TERMINATE_GRACE: Duration = Duration::from_millis(500);

pub(super) struct Supervisor {
    pub synthesis: Child,
    pub playback: Child,
    pub cancel: CancellationToken,
    pub reaped: watch::Sender<bool>,
    pub session_file: Option<(PathBuf, SessionRecord)>,
}

impl Supervisor {
    /// Wait for the session to finish, then reap both processes.
    ///
    /// `reaped` flips to `true` only after neither process is alive.
    pub(super) async fn run(mut self) -> Result<SessionOutcome, CoreError> {
        let result = observe(&mut self.synthesis, &mut self.playback, &self.cancel).await;

        reap(&mut self.playback, ProcessRole::Playback).await;
        reap(&mut self.synthesis, ProcessRole::Synthesis).await;

        if let Some((path, record)) = &self.session_file {
            if let Err(e) = clear_session_file(path, record) {
                warn!(path = %path.display(), error = %e, "Failed to clear session file");
            }
        }
        self.reaped.send_replace(true);
        result
    }
}

/// Each process's exit is observed at most once; the first decisive event
/// ends the session. Synthesis is polled before playback so its failure is
/// reported even when the player drains the pipe and exits in the same tick.
async fn observe(
    synthesis: &mut Child,
    playback: &mut Child,
    cancel: &CancellationToken,
) -> Result<SessionOutcome, CoreError> {
    let mut synthesis_done = false;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!("Session cancelled");
                return Ok(SessionOutcome::Cancelled);
            }
            status = synthesis.wait(), if !synthesis_done => {
                match classify(status?, ProcessRole::Synthesis)? {
                    Some(SessionOutcome::Completed) => {
                        debug!("Synthesis finished, waiting for playback");
                        synthesis_done = true;
                    }
                    _ => return Ok(SessionOutcome::Cancelled),
                }
            }
            status = playback.wait() => {
                return Ok(classify(status?, ProcessRole::Playback)?
                    .unwrap_or(SessionOutcome::Cancelled));
            }
        }
    }
}

/// Map an exit status to an outcome.
///
/// A missing exit code means the process was killed by a signal, which only
/// happens on an explicit stop.
fn classify(status: ExitStatus, role: ProcessRole) -> Result<Option<SessionOutcome>, CoreError> {
    match status.code() {
        Some(0) => Ok(Some(SessionOutcome::Completed)),
        Some(code) => Err(CoreError::ProcessExit { role, code }),
        None => {
            debug!(%role, "Process terminated by signal");
            Ok(None)
        }
    }
}

async fn reap(child: &mut Child, role: ProcessRole) {
    if let Err(e) = terminate_child(child, TERMINATE_GRACE).await {
        warn!(%role, error = %e, "Failed to terminate process");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn classify_exit_statuses() {
        assert_eq!(
            classify(ExitStatus::from_raw(0), ProcessRole::Playback).unwrap(),
            Some(SessionOutcome::Completed)
        );
        // Raw wait status 9: killed by SIGKILL.
        assert_eq!(
            classify(ExitStatus::from_raw(9), ProcessRole::Playback).unwrap(),
            None
        );
        let err = classify(ExitStatus::from_raw(3 << 8), ProcessRole::Synthesis).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProcessExit {
                role: ProcessRole::Synthesis,
                code: 3
            }
        ));
    }
}
