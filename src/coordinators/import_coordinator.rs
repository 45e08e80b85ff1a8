use std::sync::Arc;

use serde_json::json;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::stores::AddressStore;
use crate::types::internal::address::{AddressFields, ImportRow, ImportRowError, ImportSummary, RowInsert};
use crate::types::internal::audit::{AuditAction, EntityType};
use crate::types::internal::context::RequestContext;

/// Import coordinator that applies rows handed over by the import collaborator
///
/// Rows go one at a time through the allocator's validated single-row insert,
/// the same path bulk creation uses. Duplicates are skipped, malformed rows
/// are reported with their 1-based row number and the run continues. The whole
/// run is summarised by a single audit entry.
pub struct ImportCoordinator {
    address_store: Arc<AddressStore>,
    audit_logger: Arc<AuditLogger>,
}

impl ImportCoordinator {
    /// Create ImportCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            address_store: app_data.address_store.clone(),
            audit_logger: app_data.audit_logger.clone(),
        }
    }

    /// Apply a batch of imported rows
    ///
    /// # Errors
    /// * `ValidationError::EmptyImport` - no rows were supplied
    pub async fn import_rows(
        &self,
        ctx: &RequestContext,
        rows: Vec<ImportRow>,
    ) -> Result<ImportSummary, InternalError> {
        let audit = self.audit_logger
            .builder(AuditAction::ImportAddresses, EntityType::Address)
            .with_context(ctx);

        if rows.is_empty() {
            let error = InternalError::from(ValidationError::EmptyImport);
            audit.failure(json!({ "total_rows": 0 }), &error).record().await;
            return Err(error);
        }

        let mut summary = ImportSummary {
            total_rows: rows.len(),
            ..Default::default()
        };

        for (index, row) in rows.into_iter().enumerate() {
            let fields = AddressFields::from(row);
            match self.address_store.insert_row(&fields).await {
                Ok(RowInsert::Created(_)) => summary.created_count += 1,
                Ok(RowInsert::Skipped) => summary.skipped_count += 1,
                Err(e) => {
                    tracing::debug!("Import row {} rejected: {}", index + 1, e);
                    summary.errors.push(ImportRowError {
                        row: index + 1,
                        address: fields.address,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Import by {}: {} rows, {} created, {} skipped, {} rejected",
            ctx.actor_name, summary.total_rows, summary.created_count,
            summary.skipped_count, summary.errors.len()
        );

        audit.after(&summary).record().await;

        Ok(summary)
    }
}
