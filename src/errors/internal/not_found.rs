use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("Subnet not found: {0}")]
    Subnet(i64),

    #[error("Address not found: {0}")]
    Address(i64),

    #[error("Audit entry not found: {0}")]
    AuditEntry(i64),
}
