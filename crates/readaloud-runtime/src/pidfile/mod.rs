//! Session file tracking the live synthesis/playback pair.
//!
//! One readaloud process records its running pipeline in
//! `<data_root>/pids/session.pid` so another process (a second `read`, or
//! `stop`) can preempt it.
//!
//! # Safety guarantees
//! - Atomic writes via temp file + rename
//! - Process verification before killing (prevents PID reuse issues)
//! - An owner only deletes the file while it still holds its own record

mod io;
mod verify;

pub use io::{
    RecordedProcess, SESSION_FILE_NAME, SessionRecord, clear_session_file, delete_session_file,
    read_session_file, session_file_path, write_session_file,
};
pub use verify::{is_session_child, pid_exists};

use std::path::Path;

use tracing::{debug, info, warn};

use crate::process::kill_pid;

/// Stop the session recorded in the file at `path`, then delete the file.
///
/// Returns `true` when a recorded process was signalled. A missing or
/// unreadable file is treated as "no session".
pub async fn stop_recorded_session(path: &Path) -> bool {
    let record = match read_session_file(path) {
        Ok(record) => record,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
            let _ = delete_session_file(path);
            return false;
        }
    };

    let mut stopped = false;
    // Playback first so no audio keeps playing from a half-torn-down pipe.
    for process in [&record.playback, &record.synthesis] {
        if !is_session_child(process.pid, record.owner) {
            debug!(pid = process.pid, "Recorded process is gone or no longer ours");
            continue;
        }
        match kill_pid(process.pid).await {
            Ok(()) => {
                info!(pid = process.pid, program = %process.program, "Stopped recorded session process");
                stopped = true;
            }
            Err(e) => {
                warn!(pid = process.pid, error = %e, "Failed to stop recorded session process");
            }
        }
    }

    if let Err(e) = delete_session_file(path) {
        warn!(path = %path.display(), error = %e, "Failed to delete session file");
    }
    stopped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_a_session() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!stop_recorded_session(&temp.path().join(SESSION_FILE_NAME)).await);
    }

    #[tokio::test]
    async fn garbage_file_is_discarded() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(SESSION_FILE_NAME);
        std::fs::write(&path, "not a pid\n").unwrap();

        assert!(!stop_recorded_session(&path).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    #[cfg(target_os = "linux")]
    async fn stops_recorded_processes() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(SESSION_FILE_NAME);
        let mut synth = tokio::process::Command::new("sleep").arg("30").spawn().unwrap();
        let mut player = tokio::process::Command::new("sleep").arg("31").spawn().unwrap();

        let record = SessionRecord {
            owner: std::process::id(),
            synthesis: RecordedProcess::new(synth.id().unwrap(), "sleep"),
            playback: RecordedProcess::new(player.id().unwrap(), "sleep"),
        };
        write_session_file(&path, &record).unwrap();

        assert!(stop_recorded_session(&path).await);
        assert!(!path.exists());
        assert_eq!(synth.wait().await.unwrap().code(), None);
        assert_eq!(player.wait().await.unwrap().code(), None);
    }
}
