//! Process termination for pipeline sessions.
//!
//! Provides two strategies:
//! - `terminate_child`: for processes this session owns (includes reaping)
//! - `kill_pid`: for processes recorded by another readaloud process (PID-only, no reaping)

mod child;
mod pid;

pub use child::terminate_child;
pub use pid::kill_pid;
