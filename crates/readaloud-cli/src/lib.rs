//! Command-line adapter for readaloud.
//!
//! Parses arguments, builds the [`ReadAloud`](readaloud_runtime::ReadAloud)
//! service and dispatches to thin handlers that format results for the
//! terminal.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod utils;

pub use bootstrap::{CliConfig, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
