use sea_orm::{Database, DatabaseConnection};
use migration::{AuditMigrator, IpamMigrator, MigratorTrait};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// The two connections the service holds
///
/// Audit rows live in their own database so that a failed audit write can
/// never roll back a committed ipam mutation.
#[derive(Clone)]
pub struct DatabaseConnections {
    pub ipam: DatabaseConnection,
    pub audit: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect both databases; does NOT run migrations
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let ipam = connect(bootstrap_settings.database_url(), "connect_database").await?;
        let audit = connect(bootstrap_settings.audit_database_url(), "connect_audit_database").await?;

        Ok(Self { ipam, audit })
    }

    pub async fn migrate(&self) -> Result<(), InternalError> {
        migrate_ipam_database(&self.ipam).await?;
        migrate_audit_database(&self.audit).await?;

        Ok(())
    }
}

async fn connect(url: &str, operation: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(url)
        .await
        .map_err(|e| InternalError::database(operation, e))?;

    tracing::debug!("Connected to database: {}", url);

    Ok(db)
}

/// Run pending migrations on the ipam database
pub async fn migrate_ipam_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    IpamMigrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Ipam database migrations completed");

    Ok(())
}

/// Run pending migrations on the audit database
pub async fn migrate_audit_database(audit_db: &DatabaseConnection) -> Result<(), InternalError> {
    AuditMigrator::up(audit_db, None)
        .await
        .map_err(|e| InternalError::database("run_audit_migrations", e))?;

    tracing::debug!("Audit database migrations completed");

    Ok(())
}
