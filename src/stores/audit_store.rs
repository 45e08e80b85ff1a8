use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::{AuditError, NotFoundError};
use crate::stores::filters::contains_literal;
use crate::types::db::audit_log;
use crate::types::internal::audit::{AuditEntry, AuditEntryDraft, AuditFilter, AuditPage};

/// Largest page the audit listing hands out unless configured otherwise
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// Repository for the append-only audit trail
///
/// Only inserts and reads are exposed; entries are never updated or deleted.
pub struct AuditStore {
    db: DatabaseConnection,
    max_page_size: u64,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    /// Write an audit entry to the database
    ///
    /// Serializes the before/after snapshots to JSON text and inserts the row.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or database insert fails
    pub async fn write_entry(&self, draft: AuditEntryDraft) -> Result<i64, InternalError> {
        let before_data = draft.before.as_ref().map(serde_json::to_string).transpose()
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize before snapshot: {}", e)))?;
        let after_data = draft.after.as_ref().map(serde_json::to_string).transpose()
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize after snapshot: {}", e)))?;

        let entry = audit_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet, // Let auto-increment handle this
            actor_id: Set(draft.actor_id),
            actor_name: Set(draft.actor_name),
            action: Set(draft.action.to_string()),
            entity_type: Set(draft.entity_type.to_string()),
            entity_id: Set(draft.entity_id),
            before_data: Set(before_data),
            after_data: Set(after_data),
            ip_address: Set(draft.source_address),
            client_info: Set(draft.client_info),
            created_at: Set(Utc::now().timestamp()),
        };

        let inserted = entry.insert(&self.db).await
            .map_err(|e| InternalError::database("write_audit_entry", e))?;

        Ok(inserted.id)
    }

    /// List audit entries newest first
    ///
    /// `page` is 1-indexed; values below 1 are treated as 1 and pages past
    /// the last one come back empty. `page_size` is clamped to
    /// `1..=max_page_size`.
    pub async fn list(
        &self,
        page: u64,
        page_size: u64,
        filter: &AuditFilter,
    ) -> Result<AuditPage, InternalError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, self.max_page_size);

        let condition = Condition::all()
            .add_option(
                filter.action.as_deref()
                    .filter(|s| !s.is_empty())
                    .map(|s| contains_literal(audit_log::Column::Action, s)),
            )
            .add_option(
                filter.entity_type
                    .map(|t| audit_log::Column::EntityType.eq(t.as_str())),
            )
            .add_option(
                filter.username.as_deref()
                    .filter(|s| !s.is_empty())
                    .map(|s| contains_literal(audit_log::Column::ActorName, s)),
            );

        let paginator = audit_log::Entity::find()
            .filter(condition)
            .order_by_desc(audit_log::Column::CreatedAt)
            .order_by_desc(audit_log::Column::Id)
            .paginate(&self.db, page_size);

        let total = paginator.num_items().await
            .map_err(|e| InternalError::database("count_audit_entries", e))?;

        let total_pages = total.div_ceil(page_size);

        // Pages past the end are empty; the offset is never computed for them
        let entries = if page > total_pages {
            Vec::new()
        } else {
            paginator.fetch_page(page - 1).await
                .map_err(|e| InternalError::database("list_audit_entries", e))?
                .into_iter()
                .map(to_entry)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(AuditPage {
            entries,
            total,
            page,
            page_size,
            total_pages,
        })
    }

    /// Get a single audit entry by id
    pub async fn get(&self, id: i64) -> Result<AuditEntry, InternalError> {
        let row = audit_log::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_audit_entry", e))?
            .ok_or(NotFoundError::AuditEntry(id))?;

        to_entry(row)
    }

    /// Total number of audit entries
    pub async fn count(&self) -> Result<u64, InternalError> {
        audit_log::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_audit_entries", e))
    }
}

fn parse_snapshot(raw: Option<String>) -> Result<Option<serde_json::Value>, InternalError> {
    raw.map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(|e| InternalError::from(AuditError::CorruptSnapshot(e.to_string())))
}

fn to_entry(row: audit_log::Model) -> Result<AuditEntry, InternalError> {
    Ok(AuditEntry {
        id: row.id,
        actor_id: row.actor_id,
        actor_name: row.actor_name,
        action: row.action,
        entity_type: row.entity_type,
        entity_id: row.entity_id,
        before: parse_snapshot(row.before_data)?,
        after: parse_snapshot(row.after_data)?,
        source_address: row.ip_address,
        client_info: row.client_info,
        created_at: row.created_at,
    })
}
