use std::sync::Arc;

use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::errors::IpamError;
use crate::stores::AuditStore;
use crate::types::dto::audit::{AuditEntryResponse, AuditPageResponse};
use crate::types::internal::audit::{AuditFilter, EntityType};

/// Audit trail read-back endpoints
pub struct AuditApi {
    audit_store: Arc<AuditStore>,
}

impl AuditApi {
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }
}

#[derive(Tags)]
enum AuditTags {
    /// Audit trail
    Audit,
}

#[OpenApi(prefix_path = "/audit-logs")]
impl AuditApi {
    /// Page through audit entries, newest first
    ///
    /// `action` and `username` match substrings; `entity_type` is one of
    /// subnet, ip or user.
    #[oai(path = "/", method = "get", tag = "AuditTags::Audit")]
    async fn list(
        &self,
        page: Query<Option<u64>>,
        page_size: Query<Option<u64>>,
        action: Query<Option<String>>,
        entity_type: Query<Option<String>>,
        username: Query<Option<String>>,
    ) -> Result<Json<AuditPageResponse>, IpamError> {
        let entity_type = match entity_type.0.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(text) => Some(text.parse::<EntityType>().map_err(|_| {
                IpamError::validation_failed(format!(
                    "entity_type must be one of subnet, ip, user; got '{}'",
                    text
                ))
            })?),
        };

        let filter = AuditFilter {
            action: action.0,
            entity_type,
            username: username.0,
        };

        let result = self.audit_store
            .list(page.0.unwrap_or(1), page_size.0.unwrap_or(20), &filter)
            .await?;
        Ok(Json(result.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "AuditTags::Audit")]
    async fn get(&self, id: Path<i64>) -> Result<Json<AuditEntryResponse>, IpamError> {
        let entry = self.audit_store.get(id.0).await?;
        Ok(Json(entry.into()))
    }
}
