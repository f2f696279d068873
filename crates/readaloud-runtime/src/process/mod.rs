//! OS process helpers shared by the pipeline and the session file.

pub mod shutdown;

pub use shutdown::{kill_pid, terminate_child};
