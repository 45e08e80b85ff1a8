use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::config::{BootstrapSettings, DatabaseConnections};
use crate::stores::{AddressStore, AuditStore, StatsStore, SubnetStore};

/// Centralized application data following the main-owned stores pattern
///
/// All stores are created once in main.rs and shared across the API layer
/// and coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(connections, settings)
///   ↓ creates once
///   ├─ audit_store (audit db)
///   ├─ audit_logger (wraps audit_store)
///   ├─ subnet_store (ipam db + audit_logger)
///   ├─ address_store (ipam db + audit_logger)
///   └─ stats_store (ipam db, read-only)
///   ↓ wrapped in Arc<AppData>
///   ├─ API endpoints
///   └─ ImportCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub audit_store: Arc<AuditStore>,
    pub audit_logger: Arc<AuditLogger>,
    pub subnet_store: Arc<SubnetStore>,
    pub address_store: Arc<AddressStore>,
    pub stats_store: Arc<StatsStore>,
}

impl AppData {
    /// Build every store on top of already migrated connections
    ///
    /// The audit store comes first since the mutating stores log through it.
    pub fn new(connections: DatabaseConnections, settings: &BootstrapSettings) -> Self {
        tracing::debug!("Creating stores...");

        let audit_store = Arc::new(
            AuditStore::new(connections.audit.clone())
                .with_max_page_size(settings.audit_page_size_max()),
        );
        let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));

        let subnet_store = Arc::new(SubnetStore::new(
            connections.ipam.clone(),
            audit_logger.clone(),
        ));

        let address_store = Arc::new(
            AddressStore::new(connections.ipam.clone(), audit_logger.clone())
                .with_bulk_range_limit(settings.bulk_range_limit()),
        );

        let stats_store = Arc::new(StatsStore::new(connections.ipam.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            connections,
            audit_store,
            audit_logger,
            subnet_store,
            address_store,
            stats_store,
        }
    }
}
