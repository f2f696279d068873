//! CLI entry point - the composition root.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use readaloud_cli::commands::CatalogCommand;
use readaloud_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig {
        voices_dir: cli.voices_dir,
        catalog: cli.catalog,
    };

    if let Err(e) = run(command, config).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, config: CliConfig) -> Result<(), CliError> {
    match command {
        Commands::Catalog { command } => match command {
            CatalogCommand::Build { markdown, output } => {
                handlers::catalog::build(&markdown, output.as_deref())
            }
        },
        Commands::Setup => handlers::setup::execute(),
        Commands::Paths => handlers::paths::execute(),
        command => {
            let service = bootstrap(config)?;
            match command {
                Commands::Read { text } => handlers::read::execute(&service, text).await,
                Commands::Stop => {
                    handlers::stop::execute(&service).await;
                    Ok(())
                }
                Commands::Voices { installed } => {
                    handlers::voices::execute(&service, installed).await
                }
                Commands::Select { voice } => {
                    handlers::select::execute(&service, voice.as_deref()).await
                }
                Commands::Download { voice } => {
                    handlers::download::execute(&service, voice.as_deref()).await
                }
                Commands::Remove { voice } => {
                    handlers::remove::execute(&service, voice.as_deref()).await
                }
                Commands::Catalog { .. } | Commands::Setup | Commands::Paths => Ok(()),
            }
        }
    }
}
