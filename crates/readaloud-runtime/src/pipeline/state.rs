//! Pipeline lifecycle states and session outcomes.

use std::fmt;

/// Where the pipeline is in its current (or last) invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    /// Looking up the platform row and engine paths.
    Resolving,
    /// Preempting the previous session and starting processes.
    Spawning,
    /// Both processes are running and text has been handed over.
    Streaming,
    Completed,
    Failed,
}

impl PipelineState {
    /// Whether a session is live in this state.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Spawning | Self::Streaming)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Spawning => "spawning",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How a session that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Playback exited successfully.
    Completed,
    /// Stopped explicitly or preempted by a newer session.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_spawning_and_streaming_are_active() {
        assert!(PipelineState::Spawning.is_active());
        assert!(PipelineState::Streaming.is_active());
        assert!(!PipelineState::Idle.is_active());
        assert!(!PipelineState::Completed.is_active());
        assert_eq!(PipelineState::default().to_string(), "idle");
    }
}
