// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use ipam_backend::audit::AuditLogger;
use ipam_backend::stores::{AddressStore, AuditStore, StatsStore, SubnetStore};
use ipam_backend::types::db::{ip_address, subnet};
use ipam_backend::types::internal::address::AddressFields;
use ipam_backend::types::internal::context::RequestContext;
use ipam_backend::types::internal::subnet::SubnetFields;
use migration::{AuditMigrator, IpamMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Creates a test ipam database with migrations applied
pub async fn setup_test_ipam_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    IpamMigrator::up(&db, None)
        .await
        .expect("Failed to run ipam migrations");

    db
}

/// Creates a test audit database with migrations applied
pub async fn setup_test_audit_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create audit database");

    AuditMigrator::up(&db, None)
        .await
        .expect("Failed to run audit migrations");

    db
}

/// Every store over fresh in-memory databases
pub struct TestStores {
    pub ipam_db: DatabaseConnection,
    pub audit_store: Arc<AuditStore>,
    pub subnet_store: SubnetStore,
    pub address_store: AddressStore,
    pub stats_store: StatsStore,
}

pub async fn setup_test_stores() -> TestStores {
    setup_test_stores_with_limit(1000).await
}

pub async fn setup_test_stores_with_limit(bulk_range_limit: u64) -> TestStores {
    let ipam_db = setup_test_ipam_db().await;
    let audit_db = setup_test_audit_db().await;

    let audit_store = Arc::new(AuditStore::new(audit_db));
    let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));

    TestStores {
        subnet_store: SubnetStore::new(ipam_db.clone(), audit_logger.clone()),
        address_store: AddressStore::new(ipam_db.clone(), audit_logger)
            .with_bulk_range_limit(bulk_range_limit),
        stats_store: StatsStore::new(ipam_db.clone()),
        audit_store,
        ipam_db,
    }
}

/// Context for an identified operator
pub fn operator() -> RequestContext {
    RequestContext::new()
        .with_actor(Some(1), "alice")
        .with_ip_address("192.0.2.10".parse().unwrap())
        .with_client_info("integration-test")
}

pub fn subnet_fields(network: &str, mask: i32) -> SubnetFields {
    SubnetFields {
        network: network.to_string(),
        mask,
        description: format!("{}/{}", network, mask),
    }
}

pub fn address_fields(address: &str, subnet_id: Option<i64>, owner: &str) -> AddressFields {
    AddressFields {
        address: address.to_string(),
        subnet_id,
        owner_label: owner.to_string(),
        assigned_date: None,
        occupied: true,
        description: String::new(),
    }
}

pub async fn create_subnet(stores: &TestStores, network: &str, mask: i32) -> subnet::Model {
    stores.subnet_store
        .create(&operator(), subnet_fields(network, mask))
        .await
        .expect("Failed to create subnet")
}

pub async fn create_address(
    stores: &TestStores,
    address: &str,
    subnet_id: Option<i64>,
    owner: &str,
) -> ip_address::Model {
    stores.address_store
        .create(&operator(), address_fields(address, subnet_id, owner))
        .await
        .expect("Failed to create address")
}

pub async fn audit_count(stores: &TestStores) -> u64 {
    stores.audit_store.count().await.expect("Failed to count audit entries")
}
