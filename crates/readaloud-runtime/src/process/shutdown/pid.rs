//! Kill processes by PID without reaping (no `Child` handle available).

use std::io;

#[cfg(unix)]
use std::time::Duration;
#[cfg(unix)]
use tokio::time::sleep;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Kill a process by PID with SIGTERM → SIGKILL escalation.
///
/// Used for sessions started by another readaloud process, which still owns
/// (and reaps) the children.
///
/// # Returns
/// - `Ok(())` if the process was killed or already gone
/// - `Err` if kill operations fail (excluding ESRCH)
pub async fn kill_pid(pid: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        kill_pid_unix(pid).await
    }

    #[cfg(not(unix))]
    {
        kill_pid_windows(pid).await
    }
}

#[cfg(unix)]
async fn kill_pid_unix(pid: u32) -> io::Result<()> {
    #[allow(clippy::cast_possible_wrap)]
    let nix_pid = Pid::from_raw(pid as i32);

    for sig in [Signal::SIGTERM, Signal::SIGKILL] {
        match signal::kill(nix_pid, sig) {
            Ok(()) => {}
            Err(Errno::ESRCH) => return Ok(()),
            Err(e) => return Err(io::Error::other(e)),
        }

        // Poll for exit (up to 1 second per signal)
        for _ in 0..10 {
            sleep(Duration::from_millis(100)).await;
            if signal::kill(nix_pid, None) == Err(Errno::ESRCH) {
                return Ok(());
            }
        }
    }

    // The owner has not reaped it yet; a zombie still answers signal 0.
    Ok(())
}

#[cfg(not(unix))]
async fn kill_pid_windows(_pid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "stopping another process's session is not implemented on Windows",
    ))
}
