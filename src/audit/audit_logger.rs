use std::sync::Arc;

use crate::audit::AuditBuilder;
use crate::stores::audit_store::AuditStore;
use crate::types::internal::audit::{AuditAction, EntityType};

/// Audit logging provider shared by every mutating store
///
/// Hands out `AuditBuilder`s bound to the audit store. Read-back goes through
/// `AuditStore` directly.
pub struct AuditLogger {
    pub audit_store: Arc<AuditStore>,
}

impl AuditLogger {
    /// Create a new AuditLogger
    ///
    /// # Arguments
    /// * `audit_store` - Reference to the AuditStore for writing entries
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    /// Create an AuditBuilder for one mutation attempt
    pub fn builder(&self, action: AuditAction, entity_type: EntityType) -> AuditBuilder {
        AuditBuilder::new(self.audit_store.clone(), action, entity_type)
    }
}
