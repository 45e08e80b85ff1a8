use clap::Parser;

use ipam_backend::cli::{self, Cli, Commands};
use ipam_backend::config::{init_logging, BootstrapSettings, SystemEnvironment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&SystemEnvironment)?;

    let args = Cli::parse();
    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    match args.command() {
        Commands::Migrate => cli::migrate::run_migrations(&settings).await?,
        Commands::Serve => cli::serve::run_server(&settings).await?,
    }

    Ok(())
}
