//! Process verification so a stale session file never kills a reused PID.

#[cfg(target_os = "linux")]
use std::fs;

#[cfg(unix)]
use nix::sys::signal;
#[cfg(unix)]
use nix::unistd::Pid;

/// Whether a process with this PID exists.
pub fn pid_exists(pid: u32) -> bool {
    #[cfg(unix)]
    {
        #[allow(clippy::cast_possible_wrap)]
        let pid = Pid::from_raw(pid as i32);
        signal::kill(pid, None).is_ok()
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        false
    }
}

/// Whether `pid` is alive and still a child of the recording process `owner`.
///
/// # Platform behavior
/// - **Linux**: reads the parent PID from `/proc/<pid>/stat`
/// - **Other Unix**: only checks that the PID exists
/// - **Windows**: always `false`
///
/// If the owner died, its children were re-parented and are left alone.
pub fn is_session_child(pid: u32, owner: u32) -> bool {
    #[cfg(target_os = "linux")]
    {
        parent_pid(pid) == Some(owner)
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = owner;
        pid_exists(pid)
    }
}

#[cfg(target_os = "linux")]
fn parent_pid(pid: u32) -> Option<u32> {
    let stat = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    // `comm` may contain spaces and parentheses; fields resume after the last ')'.
    let (_, rest) = stat.rsplit_once(')')?;
    rest.split_whitespace().nth(1)?.parse().ok()
}
