use serde::Serialize;

/// Operator-supplied address record fields for create and update
#[derive(Debug, Clone, Serialize)]
pub struct AddressFields {
    pub address: String,
    pub subnet_id: Option<i64>,
    pub owner_label: String,
    pub assigned_date: Option<String>,
    pub occupied: bool,
    pub description: String,
}

/// List filter for address records
#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    pub subnet_id: Option<i64>,
    pub occupied: Option<bool>,
    /// Substring matched against address, owner label and description
    pub search: Option<String>,
}

/// Parameters of a bulk range creation
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateRequest {
    pub subnet_id: Option<i64>,
    pub start_ip: String,
    pub end_ip: String,
    pub owner_label: String,
    pub assigned_date: Option<String>,
    pub occupied: bool,
    pub description: String,
}

/// A row that was neither created nor skipped as a duplicate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub address: String,
    pub message: String,
}

/// Result of a bulk range creation
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkCreateOutcome {
    pub range: String,
    pub requested: u64,
    pub created_count: u64,
    pub skipped_count: u64,
    pub errors: Vec<RowError>,
}

/// Parameters of a bulk range deletion
#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteRequest {
    pub start_ip: String,
    pub end_ip: String,
    pub subnet_id: Option<i64>,
}

/// Result of a bulk range deletion
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkDeleteOutcome {
    pub range: String,
    pub deleted_count: u64,
    pub deleted_addresses: Vec<String>,
}

/// Outcome of inserting a single row on the bulk and import paths
#[derive(Debug, Clone, PartialEq)]
pub enum RowInsert {
    Created(i64),
    /// The address was already present
    Skipped,
}

/// One loosely-typed row handed over by the import collaborator
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportRow {
    pub address: String,
    pub subnet_id: Option<i64>,
    pub owner_label: Option<String>,
    pub assigned_date: Option<String>,
    pub occupied: Option<bool>,
    pub description: Option<String>,
}

impl From<ImportRow> for AddressFields {
    fn from(row: ImportRow) -> Self {
        Self {
            address: row.address.trim().to_string(),
            subnet_id: row.subnet_id,
            owner_label: row.owner_label.unwrap_or_default(),
            assigned_date: row.assigned_date.filter(|d| !d.trim().is_empty()),
            occupied: row.occupied.unwrap_or(false),
            description: row.description.unwrap_or_default(),
        }
    }
}

/// A rejected import row, numbered from 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub address: String,
    pub message: String,
}

/// Result of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub created_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<ImportRowError>,
}
