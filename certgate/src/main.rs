mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use logging::init_logging;

#[derive(clap::Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "certgate.yaml", env = "CERTGATE_CONFIG")]
    config: PathBuf,

    /// Log at debug level unless RUST_LOG is set
    #[clap(long, short, global = true)]
    debug: bool,
}

#[derive(clap::Subcommand)]
pub(crate) enum Commands {
    /// Run the API server
    Run,
    /// Validate the config file and the configured seed files
    Check,
    /// Import certificates and clients from JSON files into the database
    Import {
        /// Defaults to the `seed.certificates` path from the config file
        #[clap(long)]
        certificates: Option<PathBuf>,
        /// Defaults to the `seed.clients` path from the config file
        #[clap(long)]
        clients: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug)?;

    match &cli.command {
        Commands::Run => crate::commands::run::command(&cli).await,
        Commands::Check => crate::commands::check::command(&cli).await,
        Commands::Import {
            certificates,
            clients,
        } => {
            crate::commands::import::command(&cli, certificates.as_deref(), clients.as_deref())
                .await
        }
    }
}
