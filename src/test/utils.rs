// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{AuditMigrator, IpamMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, DatabaseConnections, MockEnvironment};
use crate::types::internal::context::RequestContext;

/// Creates migrated in-memory ipam and audit databases
///
/// Returns (ipam_db, audit_db)
pub async fn setup_test_databases() -> (DatabaseConnection, DatabaseConnection) {
    let ipam_db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    IpamMigrator::up(&ipam_db, None)
        .await
        .expect("Failed to run ipam migrations");

    let audit_db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&audit_db, None)
        .await
        .expect("Failed to run audit migrations");

    (ipam_db, audit_db)
}

/// Creates AppData over fresh databases with settings from `vars`
pub async fn setup_test_app_data_with(vars: &[(&str, &str)]) -> Arc<AppData> {
    let (ipam, audit) = setup_test_databases().await;
    let env = Arc::new(MockEnvironment::empty().with_vars(vars));
    let settings = BootstrapSettings::from_env_provider(env)
        .expect("Failed to load test settings");

    Arc::new(AppData::new(DatabaseConnections { ipam, audit }, &settings))
}

/// Creates AppData with default settings
pub async fn setup_test_app_data() -> Arc<AppData> {
    setup_test_app_data_with(&[]).await
}

/// Context for an identified test operator
pub fn operator_context() -> RequestContext {
    RequestContext::new()
        .with_actor(Some(7), "operator")
        .with_ip_address("10.9.8.7".parse().expect("valid test address"))
        .with_client_info("test-suite")
}
