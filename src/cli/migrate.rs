use crate::config::{BootstrapSettings, DatabaseConnections};

/// Run database migrations for the ipam and audit databases
///
/// Connects to both databases and runs all pending migrations without
/// building the stores.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
