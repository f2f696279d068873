//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Read text aloud with a local neural voice.
#[derive(Parser)]
#[command(name = "readaloud")]
#[command(about = "Read text aloud with local neural voices")]
#[command(version)]
pub struct Cli {
    /// Override the directory downloaded voices are stored in
    #[arg(long = "voices-dir", global = true, env = "READALOUD_VOICES_DIR")]
    pub voices_dir: Option<PathBuf>,

    /// Override the voice catalog lookup table
    #[arg(long = "catalog", global = true, env = "READALOUD_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "readaloud",
            "--verbose",
            "--voices-dir",
            "/tmp/voices",
            "voices",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.voices_dir, Some(PathBuf::from("/tmp/voices")));
        assert!(matches!(cli.command, Some(Commands::Voices { installed: false })));
    }

    #[test]
    fn test_read_takes_optional_text() {
        let cli = Cli::parse_from(["readaloud", "read", "Hello there"]);
        assert!(matches!(cli.command, Some(Commands::Read { text: Some(t) }) if t == "Hello there"));

        let cli = Cli::parse_from(["readaloud", "read"]);
        assert!(matches!(cli.command, Some(Commands::Read { text: None })));
    }

    #[test]
    fn test_catalog_build_args() {
        let cli = Cli::parse_from(["readaloud", "catalog", "build", "VOICES.md", "-o", "voices.json"]);
        let Some(Commands::Catalog {
            command: crate::commands::CatalogCommand::Build { markdown, output },
        }) = cli.command
        else {
            panic!("expected catalog build");
        };
        assert_eq!(markdown, PathBuf::from("VOICES.md"));
        assert_eq!(output, Some(PathBuf::from("voices.json")));
    }
}
