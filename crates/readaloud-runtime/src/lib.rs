//! Runtime for readaloud: the synthesis pipeline, cross-process session
//! tracking, engine setup, settings storage and the [`ReadAloud`] facade.

pub mod pidfile;
pub mod pipeline;
pub mod process;
pub mod service;
pub mod settings_store;
pub mod setup;

pub use pipeline::{EngineCommand, PipelineState, SessionOutcome, SpeechPipeline};
pub use service::{ReadAloud, ReadAloudConfig};
pub use settings_store::JsonSettingsRepository;
pub use setup::{SetupReport, prepare_current_engine, prepare_engine_dir};
