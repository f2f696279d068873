//! Read command handler.

use std::io::Read;

use readaloud_runtime::{ReadAloud, SessionOutcome};
use tracing::debug;

use crate::error::CliError;

/// Execute the read command.
///
/// Reads `text`, or stdin when it is absent or `-`. Ctrl-C stops playback.
pub async fn execute(service: &ReadAloud, text: Option<String>) -> Result<(), CliError> {
    let text = match text {
        Some(text) if text != "-" => text,
        _ => read_stdin()?,
    };
    if text.trim().is_empty() {
        return Err(CliError::Arguments("nothing to read".to_string()));
    }

    let outcome = tokio::select! {
        result = service.read_text(&text) => result?,
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted, stopping playback");
            service.stop_playback().await;
            SessionOutcome::Cancelled
        }
    };

    if outcome == SessionOutcome::Cancelled {
        println!("Stopped.");
    }
    Ok(())
}

fn read_stdin() -> Result<String, CliError> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
