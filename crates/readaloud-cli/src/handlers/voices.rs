//! Voices command handler.

use readaloud_core::{CoreError, VoiceId};
use readaloud_runtime::ReadAloud;
use tracing::warn;

use crate::error::CliError;

/// Execute the voices command.
///
/// Lists the catalog grouped by language, marking installed voices and the
/// selected one. With `installed_only`, or when the catalog is unavailable,
/// only local voices are listed.
pub async fn execute(service: &ReadAloud, installed_only: bool) -> Result<(), CliError> {
    let installed = service.installed_voices().await?;
    let selected = service.selected_voice().await?;

    if installed_only {
        print_installed(&installed, &selected);
        return Ok(());
    }

    let catalog = match service.catalog() {
        Ok(catalog) => catalog,
        Err(e @ CoreError::CatalogUnavailable(_)) => {
            warn!(error = %e, "Listing local voices only");
            eprintln!("{e}");
            print_installed(&installed, &selected);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut language = None;
    for entry in catalog.entries() {
        if language != Some(entry.language) {
            println!("{}", entry.language);
            language = Some(entry.language);
        }
        println!(
            "  {}{}",
            entry.id,
            markers(&entry.id, &installed, &selected)
        );
    }
    Ok(())
}

fn print_installed(installed: &[VoiceId], selected: &VoiceId) {
    if installed.is_empty() {
        println!("No voices installed.");
        return;
    }
    for id in installed {
        println!("{id}{}", markers(id, installed, selected));
    }
}

fn markers(id: &VoiceId, installed: &[VoiceId], selected: &VoiceId) -> String {
    let mut out = String::new();
    if installed.contains(id) {
        out.push_str("  [installed]");
    }
    if id == selected {
        out.push_str("  [selected]");
    }
    out
}
