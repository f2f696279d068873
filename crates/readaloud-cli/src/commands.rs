//! Commands enum and subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Available readaloud commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Read text aloud with the selected voice (stdin when TEXT is omitted or "-")
    Read {
        /// Text to read
        text: Option<String>,
    },

    /// Stop playback, including playback started by another readaloud process
    Stop,

    /// List catalog voices and mark the installed and selected ones
    Voices {
        /// Only list voices available locally
        #[arg(long)]
        installed: bool,
    },

    /// Select the voice used for reading (prompts when VOICE is omitted)
    Select {
        /// Voice identifier, e.g. "en_US-amy-medium"
        voice: Option<String>,
    },

    /// Download a voice from the catalog (prompts when VOICE is omitted)
    Download {
        /// Voice identifier, e.g. "en_GB-alan-low"
        voice: Option<String>,
    },

    /// Remove a downloaded voice (prompts when VOICE is omitted)
    Remove {
        /// Voice identifier
        voice: Option<String>,
    },

    /// Voice catalog maintenance
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Make the bundled synthesis engine runnable on this machine
    Setup,

    /// Show resolved paths for all readaloud directories
    Paths,
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Convert the Markdown voice list into the JSON lookup table
    Build {
        /// Markdown voice list
        markdown: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
