use std::sync::Arc;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::database::is_unique_violation;
use crate::errors::internal::{ConflictError, NotFoundError, ValidationError};
use crate::services::address_codec;
use crate::types::db::{ip_address, subnet};
use crate::types::internal::audit::{AuditAction, EntityType};
use crate::types::internal::context::RequestContext;
use crate::types::internal::subnet::SubnetFields;

/// Registry of administratively declared subnets
///
/// Owns the `subnets` table and records every create/update/delete attempt in
/// the audit trail, successful or not.
pub struct SubnetStore {
    db: DatabaseConnection,
    audit_logger: Arc<AuditLogger>,
}

impl SubnetStore {
    pub fn new(db: DatabaseConnection, audit_logger: Arc<AuditLogger>) -> Self {
        Self { db, audit_logger }
    }

    /// Create a subnet
    ///
    /// # Errors
    /// * `ValidationError` - malformed network or mask outside 0..=32
    /// * `ConflictError` - the (network, mask) pair already exists
    pub async fn create(
        &self,
        ctx: &RequestContext,
        fields: SubnetFields,
    ) -> Result<subnet::Model, InternalError> {
        let result = self.insert_subnet(&fields).await;

        let audit = self.audit_logger
            .builder(AuditAction::CreateSubnet, EntityType::Subnet)
            .with_context(ctx);
        match &result {
            Ok(created) => {
                tracing::info!("Subnet {}/{} created by {}", created.network, created.mask, ctx.actor_name);
                audit.entity_id(created.id).after(created).record().await;
            }
            Err(e) => {
                tracing::debug!("Subnet creation rejected: {}", e);
                audit.failure(&fields, e).record().await;
            }
        }

        result
    }

    /// Update a subnet's network, mask and description
    ///
    /// # Errors
    /// * `NotFoundError` - no subnet with this id
    /// * `ValidationError` - malformed network or mask
    /// * `ConflictError` - another subnet already has the new (network, mask)
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        fields: SubnetFields,
    ) -> Result<subnet::Model, InternalError> {
        let mut before = None;
        let result = match self.find(&self.db, id).await {
            Ok(Some(existing)) => {
                before = Some(existing.clone());
                self.apply_update(existing, &fields).await
            }
            Ok(None) => Err(NotFoundError::Subnet(id).into()),
            Err(e) => Err(e),
        };

        let mut audit = self.audit_logger
            .builder(AuditAction::UpdateSubnet, EntityType::Subnet)
            .with_context(ctx)
            .entity_id(id);
        if let Some(existing) = &before {
            audit = audit.before(existing);
        }
        match &result {
            Ok(updated) => {
                tracing::info!("Subnet {} updated by {}", id, ctx.actor_name);
                audit.after(updated).record().await;
            }
            Err(e) => audit.failure(&fields, e).record().await,
        }

        result
    }

    /// Delete a subnet, detaching its address records first
    ///
    /// Dependent records keep existing with `subnet_id` set to null. Both
    /// steps run in one transaction.
    ///
    /// # Errors
    /// * `NotFoundError` - no subnet with this id
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        let result = self.delete_with_unlink(id).await;

        let audit = self.audit_logger
            .builder(AuditAction::DeleteSubnet, EntityType::Subnet)
            .with_context(ctx)
            .entity_id(id);
        match &result {
            Ok((deleted, unlinked)) => {
                tracing::info!(
                    "Subnet {}/{} deleted by {}, {} addresses detached",
                    deleted.network, deleted.mask, ctx.actor_name, unlinked
                );
                audit.before(deleted).record().await;
            }
            Err(e) => audit.failure(serde_json::json!({ "id": id }), e).record().await,
        }

        result.map(|_| ())
    }

    /// All subnets, newest first
    pub async fn list(&self) -> Result<Vec<subnet::Model>, InternalError> {
        subnet::Entity::find()
            .order_by_desc(subnet::Column::CreatedAt)
            .order_by_desc(subnet::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_subnets", e))
    }

    pub async fn get(&self, id: i64) -> Result<subnet::Model, InternalError> {
        self.find(&self.db, id)
            .await?
            .ok_or_else(|| NotFoundError::Subnet(id).into())
    }

    async fn find(
        &self,
        conn: &impl ConnectionTrait,
        id: i64,
    ) -> Result<Option<subnet::Model>, InternalError> {
        subnet::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_subnet", e))
    }

    async fn find_by_network_mask(
        &self,
        network: &str,
        mask: i32,
    ) -> Result<Option<subnet::Model>, InternalError> {
        subnet::Entity::find()
            .filter(subnet::Column::Network.eq(network))
            .filter(subnet::Column::Mask.eq(mask))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_subnet_by_network", e))
    }

    async fn insert_subnet(&self, fields: &SubnetFields) -> Result<subnet::Model, InternalError> {
        let network = validate_fields(fields)?;

        if self.find_by_network_mask(&network, fields.mask).await?.is_some() {
            return Err(duplicate(&network, fields.mask));
        }

        let new_subnet = subnet::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            network: Set(network.clone()),
            mask: Set(fields.mask),
            description: Set(fields.description.clone()),
            created_at: Set(Utc::now().timestamp()),
        };

        new_subnet.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate(&network, fields.mask)
            } else {
                InternalError::database("insert_subnet", e)
            }
        })
    }

    async fn apply_update(
        &self,
        existing: subnet::Model,
        fields: &SubnetFields,
    ) -> Result<subnet::Model, InternalError> {
        let network = validate_fields(fields)?;

        if let Some(other) = self.find_by_network_mask(&network, fields.mask).await? {
            if other.id != existing.id {
                return Err(duplicate(&network, fields.mask));
            }
        }

        let mut active: subnet::ActiveModel = existing.into();
        active.network = Set(network.clone());
        active.mask = Set(fields.mask);
        active.description = Set(fields.description.clone());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate(&network, fields.mask)
            } else {
                InternalError::database("update_subnet", e)
            }
        })
    }

    async fn delete_with_unlink(&self, id: i64) -> Result<(subnet::Model, u64), InternalError> {
        let txn = self.db.begin().await
            .map_err(InternalError::transaction_begin)?;

        let existing = self.find(&txn, id).await?
            .ok_or(NotFoundError::Subnet(id))?;

        let unlinked = ip_address::Entity::update_many()
            .col_expr(ip_address::Column::SubnetId, Expr::value(Option::<i64>::None))
            .filter(ip_address::Column::SubnetId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("unlink_subnet_addresses", e))?;

        subnet::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_subnet", e))?;

        txn.commit().await
            .map_err(InternalError::transaction_commit)?;

        Ok((existing, unlinked.rows_affected))
    }
}

/// Validate subnet fields and return the canonical network text
fn validate_fields(fields: &SubnetFields) -> Result<String, InternalError> {
    let network = address_codec::encode(fields.network.trim())?;
    if !(0..=32).contains(&fields.mask) {
        return Err(ValidationError::InvalidMask(fields.mask).into());
    }
    Ok(address_codec::decode(network))
}

fn duplicate(network: &str, mask: i32) -> InternalError {
    ConflictError::DuplicateSubnet {
        network: network.to_string(),
        mask,
    }
    .into()
}
