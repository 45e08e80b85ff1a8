use poem_openapi::Object;

use crate::types::db::ip_address;
use crate::types::dto::common::format_timestamp;
use crate::types::internal::address::{
    AddressFields, BulkCreateOutcome, BulkCreateRequest, BulkDeleteOutcome, BulkDeleteRequest,
    ImportRow, ImportRowError, ImportSummary, RowError,
};

/// Body of address create and update
#[derive(Object, Debug)]
pub struct AddressRequest {
    /// Dotted-decimal IPv4 address
    pub address: String,
    pub subnet_id: Option<i64>,
    pub owner_label: Option<String>,

    /// YYYY-MM-DD
    pub assigned_date: Option<String>,
    pub occupied: Option<bool>,
    pub description: Option<String>,
}

impl From<AddressRequest> for AddressFields {
    fn from(request: AddressRequest) -> Self {
        Self {
            address: request.address,
            subnet_id: request.subnet_id,
            owner_label: request.owner_label.unwrap_or_default(),
            assigned_date: request.assigned_date,
            occupied: request.occupied.unwrap_or(false),
            description: request.description.unwrap_or_default(),
        }
    }
}

#[derive(Object, Debug)]
pub struct AddressResponse {
    pub id: i64,
    pub address: String,
    pub subnet_id: Option<i64>,
    pub owner_label: String,
    pub assigned_date: Option<String>,
    pub occupied: bool,
    pub description: String,

    /// Creation time (ISO 8601 format)
    pub created_at: String,
}

impl From<ip_address::Model> for AddressResponse {
    fn from(model: ip_address::Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            subnet_id: model.subnet_id,
            owner_label: model.owner_label,
            assigned_date: model.assigned_date,
            occupied: model.occupied,
            description: model.description,
            created_at: format_timestamp(model.created_at),
        }
    }
}

/// Body of a bulk range creation
#[derive(Object, Debug)]
pub struct BulkCreateAddressesRequest {
    pub subnet_id: Option<i64>,
    pub start_ip: String,
    pub end_ip: String,
    pub owner_label: Option<String>,
    pub assigned_date: Option<String>,
    pub occupied: Option<bool>,
    pub description: Option<String>,
}

impl From<BulkCreateAddressesRequest> for BulkCreateRequest {
    fn from(request: BulkCreateAddressesRequest) -> Self {
        Self {
            subnet_id: request.subnet_id,
            start_ip: request.start_ip,
            end_ip: request.end_ip,
            owner_label: request.owner_label.unwrap_or_default(),
            assigned_date: request.assigned_date,
            occupied: request.occupied.unwrap_or(false),
            description: request.description.unwrap_or_default(),
        }
    }
}

#[derive(Object, Debug)]
pub struct RowErrorResponse {
    pub address: String,
    pub message: String,
}

impl From<RowError> for RowErrorResponse {
    fn from(error: RowError) -> Self {
        Self {
            address: error.address,
            message: error.message,
        }
    }
}

#[derive(Object, Debug)]
pub struct BulkCreateAddressesResponse {
    /// start-end
    pub range: String,
    pub requested: u64,
    pub created_count: u64,

    /// Addresses that already existed
    pub skipped_count: u64,
    pub errors: Vec<RowErrorResponse>,
}

impl From<BulkCreateOutcome> for BulkCreateAddressesResponse {
    fn from(outcome: BulkCreateOutcome) -> Self {
        Self {
            range: outcome.range,
            requested: outcome.requested,
            created_count: outcome.created_count,
            skipped_count: outcome.skipped_count,
            errors: outcome.errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of a bulk range deletion
#[derive(Object, Debug)]
pub struct BulkDeleteAddressesRequest {
    pub start_ip: String,
    pub end_ip: String,

    /// Only delete records attached to this subnet
    pub subnet_id: Option<i64>,
}

impl From<BulkDeleteAddressesRequest> for BulkDeleteRequest {
    fn from(request: BulkDeleteAddressesRequest) -> Self {
        Self {
            start_ip: request.start_ip,
            end_ip: request.end_ip,
            subnet_id: request.subnet_id,
        }
    }
}

#[derive(Object, Debug)]
pub struct BulkDeleteAddressesResponse {
    pub range: String,
    pub deleted_count: u64,
    pub deleted_addresses: Vec<String>,
}

impl From<BulkDeleteOutcome> for BulkDeleteAddressesResponse {
    fn from(outcome: BulkDeleteOutcome) -> Self {
        Self {
            range: outcome.range,
            deleted_count: outcome.deleted_count,
            deleted_addresses: outcome.deleted_addresses,
        }
    }
}

/// One parsed row from an import file
#[derive(Object, Debug)]
pub struct ImportRowRequest {
    pub address: String,
    pub subnet_id: Option<i64>,
    pub owner_label: Option<String>,
    pub assigned_date: Option<String>,
    pub occupied: Option<bool>,
    pub description: Option<String>,
}

impl From<ImportRowRequest> for ImportRow {
    fn from(row: ImportRowRequest) -> Self {
        Self {
            address: row.address,
            subnet_id: row.subnet_id,
            owner_label: row.owner_label,
            assigned_date: row.assigned_date,
            occupied: row.occupied,
            description: row.description,
        }
    }
}

#[derive(Object, Debug)]
pub struct ImportAddressesRequest {
    pub rows: Vec<ImportRowRequest>,
}

#[derive(Object, Debug)]
pub struct ImportRowErrorResponse {
    /// Row number, starting at 1
    pub row: u64,
    pub address: String,
    pub message: String,
}

impl From<ImportRowError> for ImportRowErrorResponse {
    fn from(error: ImportRowError) -> Self {
        Self {
            row: error.row as u64,
            address: error.address,
            message: error.message,
        }
    }
}

#[derive(Object, Debug)]
pub struct ImportAddressesResponse {
    pub total_rows: u64,
    pub created_count: u64,
    pub skipped_count: u64,
    pub errors: Vec<ImportRowErrorResponse>,
}

impl From<ImportSummary> for ImportAddressesResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            total_rows: summary.total_rows as u64,
            created_count: summary.created_count as u64,
            skipped_count: summary.skipped_count as u64,
            errors: summary.errors.into_iter().map(Into::into).collect(),
        }
    }
}
