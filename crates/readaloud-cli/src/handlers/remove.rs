//! Remove command handler.

use readaloud_runtime::ReadAloud;

use super::parse_voice;
use crate::error::CliError;
use crate::utils::input::TerminalPicker;

/// Execute the remove command.
pub async fn execute(service: &ReadAloud, voice: Option<&str>) -> Result<(), CliError> {
    let Some(raw) = voice else {
        match service.remove_voice(&TerminalPicker).await? {
            Some(id) => println!("Removed voice {id}."),
            None => println!("Nothing removed."),
        }
        return Ok(());
    };

    let id = parse_voice(raw)?;
    let removed = service.remove(&id).await?;
    if removed.files_removed == 0 {
        println!("Voice {id} is not downloaded.");
    } else {
        println!("Removed voice {id}.");
    }
    if removed.selection_reset {
        println!("It was the selected voice; reverted to the default voice.");
    }
    Ok(())
}
