//! Select command handler.

use readaloud_runtime::ReadAloud;

use super::parse_voice;
use crate::error::CliError;
use crate::utils::input::TerminalPicker;

/// Execute the select command.
pub async fn execute(service: &ReadAloud, voice: Option<&str>) -> Result<(), CliError> {
    let Some(raw) = voice else {
        match service.select_voice(&TerminalPicker).await? {
            Some(id) => println!("Selected voice {id}."),
            None => println!("No voice selected."),
        }
        return Ok(());
    };

    let id = parse_voice(raw)?;
    service.set_voice(&id).await?;
    println!("Selected voice {id}.");
    Ok(())
}
