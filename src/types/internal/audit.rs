use std::fmt;
use std::str::FromStr;

use crate::errors::InternalError;

/// Mutation kinds recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreateSubnet,
    UpdateSubnet,
    DeleteSubnet,
    CreateAddress,
    UpdateAddress,
    DeleteAddress,
    BulkCreate,
    BulkDelete,
    ImportAddresses,
}

impl AuditAction {
    /// Legacy text stored for a successful attempt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSubnet => "CREATE_SUBNET",
            Self::UpdateSubnet => "UPDATE_SUBNET",
            Self::DeleteSubnet => "DELETE_SUBNET",
            Self::CreateAddress => "CREATE_IP",
            Self::UpdateAddress => "UPDATE_IP",
            Self::DeleteAddress => "DELETE_IP",
            Self::BulkCreate => "BULK_CREATE",
            Self::BulkDelete => "BULK_DELETE",
            Self::ImportAddresses => "IMPORT_IPS",
        }
    }

    /// Legacy text stored for a failed attempt
    pub fn failed_str(&self) -> &'static str {
        match self {
            Self::CreateSubnet => "CREATE_SUBNET_FAILED",
            Self::UpdateSubnet => "UPDATE_SUBNET_FAILED",
            Self::DeleteSubnet => "DELETE_SUBNET_FAILED",
            Self::CreateAddress => "CREATE_IP_FAILED",
            Self::UpdateAddress => "UPDATE_IP_FAILED",
            Self::DeleteAddress => "DELETE_IP_FAILED",
            Self::BulkCreate => "BULK_CREATE_FAILED",
            Self::BulkDelete => "BULK_DELETE_FAILED",
            Self::ImportAddresses => "IMPORT_IPS_FAILED",
        }
    }
}

/// Whether the recorded attempt succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Succeeded,
    Failed,
}

/// Action text as stored: the action plus its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTag {
    pub action: AuditAction,
    pub outcome: AuditOutcome,
}

impl ActionTag {
    pub fn new(action: AuditAction, outcome: AuditOutcome) -> Self {
        Self { action, outcome }
    }

    pub fn as_str(&self) -> &'static str {
        match self.outcome {
            AuditOutcome::Succeeded => self.action.as_str(),
            AuditOutcome::Failed => self.action.failed_str(),
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Subnet,
    Address,
    User,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subnet => "subnet",
            Self::Address => "ip",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subnet" => Ok(Self::Subnet),
            "ip" => Ok(Self::Address),
            "user" => Ok(Self::User),
            other => Err(InternalError::parse("entity type", other)),
        }
    }
}

/// Audit entry ready to be persisted
#[derive(Debug, Clone)]
pub struct AuditEntryDraft {
    pub action: ActionTag,
    pub entity_type: EntityType,
    pub entity_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub actor_name: String,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub source_address: String,
    pub client_info: String,
}

/// Audit entry as read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_name: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub source_address: String,
    pub client_info: String,
    pub created_at: i64,
}

/// Filters for audit read-back
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Substring of the stored action text
    pub action: Option<String>,
    /// Exact entity type
    pub entity_type: Option<EntityType>,
    /// Substring of the actor name
    pub username: Option<String>,
}

/// One page of audit entries, newest first
#[derive(Debug, Clone)]
pub struct AuditPage {
    pub entries: Vec<AuditEntry>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}
