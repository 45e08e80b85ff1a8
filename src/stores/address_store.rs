use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;

use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::database::is_unique_violation;
use crate::errors::internal::{ConflictError, NotFoundError, ValidationError};
use crate::services::address_codec::{self, AddressRange};
use crate::stores::filters::contains_literal;
use crate::types::db::{ip_address, subnet};
use crate::types::internal::address::{
    AddressFields, AddressFilter, BulkCreateOutcome, BulkCreateRequest, BulkDeleteOutcome,
    BulkDeleteRequest, RowError, RowInsert,
};
use crate::types::internal::audit::{AuditAction, EntityType};
use crate::types::internal::context::RequestContext;

/// Largest range a single bulk call may cover unless configured otherwise
pub const DEFAULT_BULK_RANGE_LIMIT: u64 = 1000;

/// Address record fields after validation
#[derive(Debug, Clone)]
struct ValidatedRecord {
    address: String,
    address_int: u32,
    subnet_id: Option<i64>,
    owner_label: String,
    assigned_date: Option<String>,
    occupied: bool,
    description: String,
}

impl ValidatedRecord {
    fn into_active_model(self) -> ip_address::ActiveModel {
        ip_address::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            address: Set(self.address),
            address_int: Set(i64::from(self.address_int)),
            subnet_id: Set(self.subnet_id),
            owner_label: Set(self.owner_label),
            assigned_date: Set(self.assigned_date),
            occupied: Set(self.occupied),
            description: Set(self.description),
            created_at: Set(Utc::now().timestamp()),
        }
    }
}

/// Allocator of individual address records
///
/// Owns the `ip_addresses` table. Single-record operations surface the first
/// blocking error; bulk operations accumulate per-row errors and record one
/// audit entry per batch.
pub struct AddressStore {
    db: DatabaseConnection,
    audit_logger: Arc<AuditLogger>,
    bulk_range_limit: u64,
}

impl AddressStore {
    pub fn new(db: DatabaseConnection, audit_logger: Arc<AuditLogger>) -> Self {
        Self {
            db,
            audit_logger,
            bulk_range_limit: DEFAULT_BULK_RANGE_LIMIT,
        }
    }

    pub fn with_bulk_range_limit(mut self, limit: u64) -> Self {
        self.bulk_range_limit = limit.max(1);
        self
    }

    /// Create a single address record
    ///
    /// # Errors
    /// * `ValidationError` - malformed address or date, unknown subnet
    /// * `ConflictError` - the address already exists
    pub async fn create(
        &self,
        ctx: &RequestContext,
        fields: AddressFields,
    ) -> Result<ip_address::Model, InternalError> {
        let result = self.create_record(&fields).await;

        let audit = self.audit_logger
            .builder(AuditAction::CreateAddress, EntityType::Address)
            .with_context(ctx);
        match &result {
            Ok(created) => {
                tracing::info!("Address {} created by {}", created.address, ctx.actor_name);
                audit.entity_id(created.id).after(created).record().await;
            }
            Err(e) => audit.failure(&fields, e).record().await,
        }

        result
    }

    /// Update an address record
    ///
    /// # Errors
    /// * `NotFoundError` - no record with this id
    /// * `ValidationError` - malformed address or date, unknown subnet
    /// * `ConflictError` - the new address belongs to another record
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        fields: AddressFields,
    ) -> Result<ip_address::Model, InternalError> {
        let mut before = None;
        let result = match self.find(id).await {
            Ok(Some(existing)) => {
                before = Some(existing.clone());
                self.apply_update(existing, &fields).await
            }
            Ok(None) => Err(NotFoundError::Address(id).into()),
            Err(e) => Err(e),
        };

        let mut audit = self.audit_logger
            .builder(AuditAction::UpdateAddress, EntityType::Address)
            .with_context(ctx)
            .entity_id(id);
        if let Some(existing) = &before {
            audit = audit.before(existing);
        }
        match &result {
            Ok(updated) => {
                tracing::info!("Address {} updated by {}", updated.address, ctx.actor_name);
                audit.after(updated).record().await;
            }
            Err(e) => audit.failure(&fields, e).record().await,
        }

        result
    }

    /// Delete an address record
    ///
    /// # Errors
    /// * `NotFoundError` - no record with this id
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        let result = self.delete_record(id).await;

        let audit = self.audit_logger
            .builder(AuditAction::DeleteAddress, EntityType::Address)
            .with_context(ctx)
            .entity_id(id);
        match &result {
            Ok(deleted) => {
                tracing::info!("Address {} deleted by {}", deleted.address, ctx.actor_name);
                audit.before(deleted).record().await;
            }
            Err(e) => audit.failure(json!({ "id": id }), e).record().await,
        }

        result.map(|_| ())
    }

    pub async fn get(&self, id: i64) -> Result<ip_address::Model, InternalError> {
        self.find(id)
            .await?
            .ok_or_else(|| NotFoundError::Address(id).into())
    }

    /// Address records matching the filter, in ascending address order
    ///
    /// Ordering uses the numeric value, so 10.0.0.9 sorts before 10.0.0.10.
    pub async fn list(&self, filter: &AddressFilter) -> Result<Vec<ip_address::Model>, InternalError> {
        let search = filter.search.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Condition::any()
                    .add(contains_literal(ip_address::Column::Address, s))
                    .add(contains_literal(ip_address::Column::OwnerLabel, s))
                    .add(contains_literal(ip_address::Column::Description, s))
            });

        let condition = Condition::all()
            .add_option(filter.subnet_id.map(|id| ip_address::Column::SubnetId.eq(id)))
            .add_option(filter.occupied.map(|o| ip_address::Column::Occupied.eq(o)))
            .add_option(search);

        ip_address::Entity::find()
            .filter(condition)
            .order_by_asc(ip_address::Column::AddressInt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_addresses", e))
    }

    /// Materialize every address of a range
    ///
    /// Addresses that already exist are skipped, which makes repeated calls
    /// idempotent. Rows that fail for other reasons are collected in
    /// `errors` without stopping the batch. One audit entry covers the batch.
    ///
    /// # Errors
    /// * `ValidationError` - malformed endpoints, start > end, range over the
    ///   limit, bad date or unknown subnet; nothing is written
    pub async fn bulk_create(
        &self,
        ctx: &RequestContext,
        request: BulkCreateRequest,
    ) -> Result<BulkCreateOutcome, InternalError> {
        let result = self.run_bulk_create(&request).await;

        let audit = self.audit_logger
            .builder(AuditAction::BulkCreate, EntityType::Address)
            .with_context(ctx);
        match &result {
            Ok(outcome) => {
                tracing::info!(
                    "Bulk create {} by {}: {} created, {} skipped, {} failed",
                    outcome.range, ctx.actor_name, outcome.created_count,
                    outcome.skipped_count, outcome.errors.len()
                );
                audit.after(json!({
                    "range": outcome.range,
                    "requested": outcome.requested,
                    "created_count": outcome.created_count,
                    "skipped_count": outcome.skipped_count,
                    "errors": outcome.errors,
                    "parameters": request,
                }))
                .record()
                .await;
            }
            Err(e) => audit.failure(&request, e).record().await,
        }

        result
    }

    /// Remove every existing record inside a range
    ///
    /// Only records present at the time of the call are deleted, optionally
    /// restricted to one subnet. The reported count and address list match
    /// that set exactly.
    ///
    /// # Errors
    /// * `ValidationError` - malformed endpoints, start > end or range over
    ///   the limit; nothing is deleted
    pub async fn bulk_delete(
        &self,
        ctx: &RequestContext,
        request: BulkDeleteRequest,
    ) -> Result<BulkDeleteOutcome, InternalError> {
        let result = self.run_bulk_delete(&request).await;

        let audit = self.audit_logger
            .builder(AuditAction::BulkDelete, EntityType::Address)
            .with_context(ctx);
        match &result {
            Ok((removed, outcome)) => {
                tracing::info!(
                    "Bulk delete {} by {}: {} deleted",
                    outcome.range, ctx.actor_name, outcome.deleted_count
                );
                audit.before(removed)
                    .after(json!({
                        "range": outcome.range,
                        "deleted_count": outcome.deleted_count,
                        "subnet_id": request.subnet_id,
                    }))
                    .record()
                    .await;
            }
            Err(e) => audit.failure(&request, e).record().await,
        }

        result.map(|(_, outcome)| outcome)
    }

    /// Validate and insert one row without recording an audit entry
    ///
    /// Used by batch callers that record a single summary entry themselves.
    /// A row whose address already exists yields `RowInsert::Skipped`.
    pub async fn insert_row(&self, fields: &AddressFields) -> Result<RowInsert, InternalError> {
        let record = validate_fields(fields)?;
        self.ensure_subnet(record.subnet_id).await?;
        self.insert_validated(record).await
    }

    async fn create_record(&self, fields: &AddressFields) -> Result<ip_address::Model, InternalError> {
        let record = validate_fields(fields)?;
        self.ensure_subnet(record.subnet_id).await?;
        let address = record.address.clone();

        match self.insert_validated(record).await? {
            RowInsert::Created(id) => self.get(id).await,
            RowInsert::Skipped => Err(ConflictError::DuplicateAddress(address).into()),
        }
    }

    async fn insert_validated(&self, record: ValidatedRecord) -> Result<RowInsert, InternalError> {
        match record.into_active_model().insert(&self.db).await {
            Ok(inserted) => Ok(RowInsert::Created(inserted.id)),
            // The unique index is the arbiter for concurrent creates
            Err(e) if is_unique_violation(&e) => Ok(RowInsert::Skipped),
            Err(e) => Err(InternalError::database("insert_address", e)),
        }
    }

    async fn apply_update(
        &self,
        existing: ip_address::Model,
        fields: &AddressFields,
    ) -> Result<ip_address::Model, InternalError> {
        let record = validate_fields(fields)?;
        self.ensure_subnet(record.subnet_id).await?;

        let mut active: ip_address::ActiveModel = existing.into();
        active.address = Set(record.address.clone());
        active.address_int = Set(i64::from(record.address_int));
        active.subnet_id = Set(record.subnet_id);
        active.owner_label = Set(record.owner_label);
        active.assigned_date = Set(record.assigned_date);
        active.occupied = Set(record.occupied);
        active.description = Set(record.description);

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ConflictError::DuplicateAddress(record.address).into()
            } else {
                InternalError::database("update_address", e)
            }
        })
    }

    async fn delete_record(&self, id: i64) -> Result<ip_address::Model, InternalError> {
        let existing = self.get(id).await?;

        ip_address::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_address", e))?;

        Ok(existing)
    }

    async fn run_bulk_create(&self, request: &BulkCreateRequest) -> Result<BulkCreateOutcome, InternalError> {
        let range = AddressRange::parse(&request.start_ip, &request.end_ip, self.bulk_range_limit)?;
        let assigned_date = validate_date(request.assigned_date.as_deref())?;
        self.ensure_subnet(request.subnet_id).await?;

        let existing: HashSet<i64> = ip_address::Entity::find()
            .select_only()
            .column(ip_address::Column::AddressInt)
            .filter(ip_address::Column::AddressInt.between(i64::from(range.start), i64::from(range.end)))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_existing_in_range", e))?
            .into_iter()
            .collect();

        let mut outcome = BulkCreateOutcome {
            range: range.describe(),
            requested: range.len(),
            ..Default::default()
        };

        for value in range.values() {
            let address = address_codec::decode(value);
            if existing.contains(&i64::from(value)) {
                tracing::debug!("Bulk create skipping existing address {}", address);
                outcome.skipped_count += 1;
                continue;
            }

            let record = ValidatedRecord {
                address: address.clone(),
                address_int: value,
                subnet_id: request.subnet_id,
                owner_label: request.owner_label.clone(),
                assigned_date: assigned_date.clone(),
                occupied: request.occupied,
                description: request.description.clone(),
            };

            match self.insert_validated(record).await {
                Ok(RowInsert::Created(_)) => outcome.created_count += 1,
                Ok(RowInsert::Skipped) => {
                    tracing::debug!("Bulk create lost race for {}", address);
                    outcome.skipped_count += 1;
                }
                Err(e) => {
                    tracing::warn!("Bulk create failed for {}: {}", address, e);
                    outcome.errors.push(RowError {
                        address,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    async fn run_bulk_delete(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<(Vec<ip_address::Model>, BulkDeleteOutcome), InternalError> {
        let range = AddressRange::parse(&request.start_ip, &request.end_ip, self.bulk_range_limit)?;

        let txn = self.db.begin().await
            .map_err(InternalError::transaction_begin)?;

        let condition = Condition::all()
            .add(ip_address::Column::AddressInt.between(i64::from(range.start), i64::from(range.end)))
            .add_option(request.subnet_id.map(|id| ip_address::Column::SubnetId.eq(id)));

        let matched = ip_address::Entity::find()
            .filter(condition)
            .order_by_asc(ip_address::Column::AddressInt)
            .all(&txn)
            .await
            .map_err(|e| InternalError::database("find_addresses_in_range", e))?;

        if !matched.is_empty() {
            let ids: Vec<i64> = matched.iter().map(|m| m.id).collect();
            let deleted = ip_address::Entity::delete_many()
                .filter(ip_address::Column::Id.is_in(ids))
                .exec(&txn)
                .await
                .map_err(|e| InternalError::database("bulk_delete_addresses", e))?;

            if deleted.rows_affected != matched.len() as u64 {
                tracing::warn!(
                    "Bulk delete {} matched {} rows but removed {}",
                    range.describe(), matched.len(), deleted.rows_affected
                );
            }
        }

        txn.commit().await
            .map_err(InternalError::transaction_commit)?;

        let outcome = BulkDeleteOutcome {
            range: range.describe(),
            deleted_count: matched.len() as u64,
            deleted_addresses: matched.iter().map(|m| m.address.clone()).collect(),
        };

        Ok((matched, outcome))
    }

    async fn ensure_subnet(&self, subnet_id: Option<i64>) -> Result<(), InternalError> {
        let Some(id) = subnet_id else {
            return Ok(());
        };

        let found = subnet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_subnet", e))?;

        match found {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownSubnet(id).into()),
        }
    }

    async fn find(&self, id: i64) -> Result<Option<ip_address::Model>, InternalError> {
        ip_address::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_address", e))
    }
}

fn validate_fields(fields: &AddressFields) -> Result<ValidatedRecord, InternalError> {
    let address_int = address_codec::encode(fields.address.trim())?;
    let assigned_date = validate_date(fields.assigned_date.as_deref())?;

    Ok(ValidatedRecord {
        address: address_codec::decode(address_int),
        address_int,
        subnet_id: fields.subnet_id,
        owner_label: fields.owner_label.trim().to_string(),
        assigned_date,
        occupied: fields.occupied,
        description: fields.description.clone(),
    })
}

/// Normalize an optional YYYY-MM-DD date; blank counts as absent
fn validate_date(date: Option<&str>) -> Result<Option<String>, InternalError> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(|parsed| Some(parsed.format("%Y-%m-%d").to_string()))
            .map_err(|_| ValidationError::InvalidDate(d.to_string()).into()),
    }
}
