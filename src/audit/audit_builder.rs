use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::internal::audit::{ActionTag, AuditAction, AuditEntryDraft, AuditOutcome, EntityType};
use crate::types::internal::context::RequestContext;
use crate::types::internal::context::request_context::SYSTEM_ACTOR;

/// Builder for audit entries
///
/// Collects the actor descriptor, the entity reference and the before/after
/// snapshots of one mutation attempt.
///
/// # Example
/// ```ignore
/// audit_logger
///     .builder(AuditAction::UpdateSubnet, EntityType::Subnet)
///     .with_context(ctx)
///     .entity_id(subnet.id)
///     .before(&old)
///     .after(&subnet)
///     .record()
///     .await;
/// ```
pub struct AuditBuilder {
    action: AuditAction,
    outcome: AuditOutcome,
    entity_type: EntityType,
    entity_id: Option<i64>,
    actor_id: Option<i64>,
    actor_name: Option<String>,
    source_address: Option<String>,
    client_info: Option<String>,
    before: Option<serde_json::Value>,
    after: Option<serde_json::Value>,
    store: Arc<AuditStore>,
}

impl AuditBuilder {
    pub fn new(store: Arc<AuditStore>, action: AuditAction, entity_type: EntityType) -> Self {
        Self {
            action,
            outcome: AuditOutcome::Succeeded,
            entity_type,
            entity_id: None,
            actor_id: None,
            actor_name: None,
            source_address: None,
            client_info: None,
            before: None,
            after: None,
            store,
        }
    }

    /// Populate the actor descriptor from RequestContext
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.actor_id = ctx.actor_id;
        self.actor_name = Some(ctx.actor_name.clone());
        self.source_address = Some(ctx.source_address());
        self.client_info = Some(ctx.client_info.clone());
        self
    }

    pub fn entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Snapshot of the entity before the mutation
    pub fn before(mut self, value: impl Serialize) -> Self {
        self.before = snapshot(self.action, "before", value);
        self
    }

    /// Snapshot of the entity (or batch descriptor) after the mutation
    pub fn after(mut self, value: impl Serialize) -> Self {
        self.after = snapshot(self.action, "after", value);
        self
    }

    /// Mark the attempt as failed
    ///
    /// The attempted input and the error description become the `after`
    /// snapshot and the action is stored as its `_FAILED` variant.
    pub fn failure(mut self, input: impl Serialize, error: &InternalError) -> Self {
        self.outcome = AuditOutcome::Failed;
        self.after = Some(json!({
            "input": snapshot(self.action, "input", input),
            "error": error.to_string(),
        }));
        self
    }

    /// Build the audit entry without writing it
    pub fn build(self) -> AuditEntryDraft {
        AuditEntryDraft {
            action: ActionTag::new(self.action, self.outcome),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            actor_id: self.actor_id,
            actor_name: self.actor_name.unwrap_or_else(|| SYSTEM_ACTOR.to_string()),
            before: self.before,
            after: self.after,
            source_address: self.source_address.unwrap_or_else(|| "unknown".to_string()),
            client_info: self.client_info.unwrap_or_default(),
        }
    }

    /// Write the entry and return its id
    pub async fn write(self) -> Result<i64, InternalError> {
        let store = self.store.clone();
        let draft = self.build();
        store.write_entry(draft).await
    }

    /// Write the entry without failing the caller
    ///
    /// The mutation being recorded has already been applied; a write failure
    /// is logged and swallowed.
    pub async fn record(self) {
        let store = self.store.clone();
        let draft = self.build();
        let action = draft.action;
        if let Err(e) = store.write_entry(draft).await {
            tracing::error!(action = %action, "Failed to record audit entry: {}", e);
        }
    }
}

/// Serialize a snapshot; a value that cannot be serialized is logged and left out
fn snapshot(action: AuditAction, field: &str, value: impl Serialize) -> Option<serde_json::Value> {
    match serde_json::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(action = %action.as_str(), field, "Audit snapshot could not be serialized: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::internal::ValidationError;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    async fn builder() -> AuditBuilder {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        AuditBuilder::new(Arc::new(AuditStore::new(db)), AuditAction::CreateAddress, EntityType::Address)
    }

    #[tokio::test]
    async fn unserializable_snapshots_are_left_out() {
        let draft = builder().await
            .before(Unserializable)
            .after(Unserializable)
            .build();

        assert_eq!(draft.before, None);
        assert_eq!(draft.after, None);
    }

    #[tokio::test]
    async fn unserializable_failure_input_keeps_the_error() {
        let error = InternalError::Validation(ValidationError::EmptyImport);
        let draft = builder().await
            .failure(Unserializable, &error)
            .build();

        let after = draft.after.unwrap();
        assert_eq!(after["input"], serde_json::Value::Null);
        assert_eq!(after["error"], error.to_string());
        assert_eq!(draft.action.as_str(), "CREATE_IP_FAILED");
    }
}
