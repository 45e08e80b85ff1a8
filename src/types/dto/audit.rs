use poem_openapi::Object;

use crate::types::dto::common::format_timestamp;
use crate::types::internal::audit::{AuditEntry, AuditPage};

#[derive(Object, Debug)]
pub struct AuditEntryResponse {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_name: String,

    /// Legacy action text, e.g. BULK_CREATE or CREATE_IP_FAILED
    pub action: String,

    /// subnet, ip or user
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub source_address: String,
    pub client_info: String,

    /// Creation time (ISO 8601 format)
    pub created_at: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            before: entry.before,
            after: entry.after,
            source_address: entry.source_address,
            client_info: entry.client_info,
            created_at: format_timestamp(entry.created_at),
        }
    }
}

#[derive(Object, Debug)]
pub struct AuditPageResponse {
    pub entries: Vec<AuditEntryResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl From<AuditPage> for AuditPageResponse {
    fn from(page: AuditPage) -> Self {
        Self {
            entries: page.entries.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}
