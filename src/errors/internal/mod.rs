use thiserror::Error;

pub mod address;
pub mod audit;
pub mod conflict;
pub mod database;
pub mod not_found;
pub mod validation;

pub use address::AddressFormatError;
pub use audit::AuditError;
pub use conflict::ConflictError;
pub use database::DatabaseError;
pub use not_found::NotFoundError;
pub use validation::ValidationError;

/// Internal error type for store and coordinator operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors.
/// Not exposed via API - endpoints must convert to IpamError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl InternalError {
    /// Create a database error with the name of the failing operation
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a storage failure rather than a caller mistake
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Parse { .. } | Self::Audit(_))
    }
}

impl From<AddressFormatError> for InternalError {
    fn from(err: AddressFormatError) -> Self {
        InternalError::Validation(ValidationError::from(err))
    }
}
