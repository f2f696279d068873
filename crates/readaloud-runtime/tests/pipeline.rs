//! End-to-end pipeline behaviour with shell scripts standing in for the
//! synthesis engine and the audio player.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use readaloud_core::{CoreError, ProcessRole};
use readaloud_runtime::pidfile::{SESSION_FILE_NAME, pid_exists, read_session_file};
use readaloud_runtime::{EngineCommand, PipelineState, SessionOutcome, SpeechPipeline};
use tempfile::TempDir;
use tokio::time::timeout;

const SETTLE: Duration = Duration::from_secs(10);

struct Fixture {
    dir: TempDir,
    model: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("en_US-amy-medium.onnx");
        std::fs::write(&model, b"model").unwrap();
        Self { dir, model }
    }

    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join("played.raw")
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("pids").join(SESSION_FILE_NAME)
    }

    /// Synthesis echoes its input; playback records what it receives.
    fn recording_engine(&self) -> EngineCommand {
        EngineCommand {
            synthesis: self.script("synth.sh", "cat"),
            playback_program: "sh".to_string(),
            playback_args: vec![
                "-c".to_string(),
                format!("cat > '{}'", self.output().display()),
            ],
        }
    }

    /// Synthesis never finishes, so playback never sees end of input.
    fn hanging_engine(&self) -> EngineCommand {
        EngineCommand {
            synthesis: self.script("hang.sh", "exec sleep 30"),
            playback_program: "sh".to_string(),
            playback_args: vec!["-c".to_string(), "cat > /dev/null".to_string()],
        }
    }
}

async fn wait_for_streaming(pipeline: &SpeechPipeline) {
    let mut states = pipeline.subscribe();
    timeout(SETTLE, states.wait_for(|s| *s == PipelineState::Streaming))
        .await
        .expect("session never started")
        .unwrap();
}

#[tokio::test]
async fn text_flows_through_to_the_player() {
    let fx = Fixture::new();
    let pipeline = SpeechPipeline::new().with_engine(fx.recording_engine());

    let outcome = timeout(SETTLE, pipeline.speak("Hello there.", &fx.model))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Completed);
    assert_eq!(std::fs::read_to_string(fx.output()).unwrap(), "Hello there.");
    assert_eq!(pipeline.state(), PipelineState::Completed);
    assert!(!pipeline.is_active().await);
}

#[tokio::test]
async fn missing_model_spawns_nothing() {
    let fx = Fixture::new();
    let pipeline = SpeechPipeline::new()
        .with_engine(fx.recording_engine())
        .with_session_file(fx.session_file());

    let missing = fx.dir.path().join("en_GB-alan-low.onnx");
    let err = pipeline.speak("Hello", &missing).await.unwrap_err();

    assert!(matches!(err, CoreError::VoiceFileNotFound(path) if path == missing));
    assert!(!fx.output().exists());
    assert!(!fx.session_file().exists());
    assert_eq!(pipeline.state(), PipelineState::Failed);
}

#[tokio::test]
async fn missing_executable_is_reported() {
    let fx = Fixture::new();
    let engine = EngineCommand {
        synthesis: fx.dir.path().join("piper"),
        ..fx.recording_engine()
    };
    let pipeline = SpeechPipeline::new().with_engine(engine);

    let err = pipeline.speak("Hello", &fx.model).await.unwrap_err();
    assert!(matches!(err, CoreError::ExecutableNotFound(_)));
}

#[tokio::test]
async fn player_spawn_failure_is_reported() {
    let fx = Fixture::new();
    let engine = EngineCommand {
        playback_program: fx.dir.path().join("no-such-player").display().to_string(),
        ..fx.recording_engine()
    };
    let pipeline = SpeechPipeline::new().with_engine(engine);

    let err = pipeline.speak("Hello", &fx.model).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::ProcessSpawn {
            role: ProcessRole::Playback,
            ..
        }
    ));
    assert!(!pipeline.is_active().await);
}

#[tokio::test]
async fn synthesis_failure_carries_exit_code() {
    let fx = Fixture::new();
    let engine = EngineCommand {
        synthesis: fx.script("fail.sh", "exit 4"),
        ..fx.recording_engine()
    };
    let pipeline = SpeechPipeline::new().with_engine(engine);

    let err = timeout(SETTLE, pipeline.speak("Hello", &fx.model))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::ProcessExit {
            role: ProcessRole::Synthesis,
            code: 4
        }
    ));
    assert_eq!(pipeline.state(), PipelineState::Failed);
}

#[tokio::test]
async fn player_failure_carries_exit_code() {
    let fx = Fixture::new();
    let engine = EngineCommand {
        playback_args: vec!["-c".to_string(), "cat > /dev/null; exit 3".to_string()],
        ..fx.recording_engine()
    };
    let pipeline = SpeechPipeline::new().with_engine(engine);

    let err = timeout(SETTLE, pipeline.speak("Hello", &fx.model))
        .await
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::ProcessExit {
            role: ProcessRole::Playback,
            code: 3
        }
    ));
}

#[tokio::test]
async fn stop_without_session_is_noop() {
    let fx = Fixture::new();
    let pipeline = SpeechPipeline::new().with_session_file(fx.session_file());

    assert!(!pipeline.stop().await);
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[tokio::test]
async fn stop_cancels_live_session() {
    let fx = Fixture::new();
    let pipeline = Arc::new(
        SpeechPipeline::new()
            .with_engine(fx.hanging_engine())
            .with_session_file(fx.session_file()),
    );

    let speaking = tokio::spawn({
        let pipeline = Arc::clone(&pipeline);
        let model = fx.model.clone();
        async move { pipeline.speak("Hello", &model).await }
    });
    wait_for_streaming(&pipeline).await;
    let record = read_session_file(&fx.session_file()).unwrap();

    assert!(pipeline.stop().await);

    let outcome = timeout(SETTLE, speaking).await.unwrap().unwrap().unwrap();
    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(!pid_exists(record.synthesis.pid));
    assert!(!pid_exists(record.playback.pid));
    assert!(!fx.session_file().exists());
}

#[tokio::test]
async fn new_request_preempts_previous_session() {
    let fx = Fixture::new();
    let pipeline = Arc::new(
        SpeechPipeline::new()
            .with_engine(fx.hanging_engine())
            .with_session_file(fx.session_file()),
    );

    let first = tokio::spawn({
        let pipeline = Arc::clone(&pipeline);
        let model = fx.model.clone();
        async move { pipeline.speak("first", &model).await }
    });
    wait_for_streaming(&pipeline).await;
    let first_record = read_session_file(&fx.session_file()).unwrap();

    let second = tokio::spawn({
        let pipeline = Arc::clone(&pipeline);
        let model = fx.model.clone();
        async move { pipeline.speak("second", &model).await }
    });

    let first_outcome = timeout(SETTLE, first).await.unwrap().unwrap().unwrap();
    assert_eq!(first_outcome, SessionOutcome::Cancelled);
    assert!(!pid_exists(first_record.synthesis.pid));
    assert!(!pid_exists(first_record.playback.pid));

    // Exactly one live pair: the second session's.
    timeout(SETTLE, async {
        loop {
            if let Ok(record) = read_session_file(&fx.session_file()) {
                if record != first_record {
                    return record;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap();
    assert!(pipeline.is_active().await);

    assert!(pipeline.stop().await);
    let second_outcome = timeout(SETTLE, second).await.unwrap().unwrap().unwrap();
    assert_eq!(second_outcome, SessionOutcome::Cancelled);
}

#[tokio::test]
async fn recorded_session_of_another_pipeline_is_preempted() {
    let fx = Fixture::new();
    let other = Arc::new(
        SpeechPipeline::new()
            .with_engine(fx.hanging_engine())
            .with_session_file(fx.session_file()),
    );
    let this = SpeechPipeline::new()
        .with_engine(fx.recording_engine())
        .with_session_file(fx.session_file());

    let other_session = tokio::spawn({
        let other = Arc::clone(&other);
        let model = fx.model.clone();
        async move { other.speak("elsewhere", &model).await }
    });
    wait_for_streaming(&other).await;

    let outcome = timeout(SETTLE, this.speak("here", &fx.model))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Completed);

    let other_outcome = timeout(SETTLE, other_session).await.unwrap().unwrap().unwrap();
    assert_eq!(other_outcome, SessionOutcome::Cancelled);
}

