//! Catalog command handler.

use std::path::Path;

use readaloud_core::VoiceCatalog;
use tracing::info;

use crate::error::CliError;

/// Convert the Markdown voice list at `markdown` into the JSON lookup table.
///
/// Writes to `output` when given, otherwise prints to stdout.
pub fn build(markdown: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let doc = std::fs::read_to_string(markdown)
        .map_err(|e| CliError::Io(format!("{}: {e}", markdown.display())))?;
    let catalog = VoiceCatalog::parse_markdown(&doc);
    if catalog.is_empty() {
        return Err(CliError::Arguments(format!(
            "no voices found in {}",
            markdown.display()
        )));
    }
    let json = catalog.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            info!(
                path = %path.display(),
                voices = catalog.entries().count(),
                "Wrote catalog lookup table"
            );
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_writes_lookup_table() {
        let temp = tempfile::tempdir().unwrap();
        let md = temp.path().join("VOICES.md");
        let out = temp.path().join("voices.json");
        std::fs::write(
            &md,
            "* English (en_US)\n    * amy\n        * medium - [[model](URL1)] [[config](URL2)]\n",
        )
        .unwrap();

        build(&md, Some(&out)).unwrap();

        let catalog = VoiceCatalog::load(&out).unwrap();
        assert_eq!(catalog.assets("English (en_US)", "amy", "medium").unwrap().model, "URL1");
    }

    #[test]
    fn document_without_voices_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let md = temp.path().join("VOICES.md");
        std::fs::write(&md, "# Nothing here\n").unwrap();

        let err = build(&md, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
