use crate::errors::internal::InternalError;
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for IPAM endpoints
#[derive(Object, Debug)]
pub struct IpamErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// IPAM operation error types
#[derive(ApiResponse, Debug)]
pub enum IpamError {
    /// Malformed address, invalid mask, or an inverted/oversized range
    #[oai(status = 400)]
    ValidationFailed(Json<IpamErrorResponse>),

    /// Referenced subnet, address, or audit entry does not exist
    #[oai(status = 404)]
    NotFound(Json<IpamErrorResponse>),

    /// Uniqueness violation on subnet or address
    #[oai(status = 409)]
    Conflict(Json<IpamErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<IpamErrorResponse>),
}

impl IpamError {
    pub fn validation_failed(message: impl Into<String>) -> Self {
        IpamError::ValidationFailed(Json(IpamErrorResponse {
            error: "validation_failed".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        IpamError::NotFound(Json(IpamErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        IpamError::Conflict(Json(IpamErrorResponse {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    /// Convert InternalError to IpamError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Storage details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        if err.is_storage() {
            tracing::error!("Storage error in IPAM operation: {}", err);
            return Self::internal_server_error();
        }

        match err {
            InternalError::Validation(e) => Self::validation_failed(e.to_string()),
            InternalError::Conflict(e) => Self::conflict(e.to_string()),
            InternalError::NotFound(e) => Self::not_found(e.to_string()),
            InternalError::Database(_) | InternalError::Parse { .. } | InternalError::Audit(_) => {
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal error without internal details
    fn internal_server_error() -> Self {
        IpamError::InternalError(Json(IpamErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            IpamError::ValidationFailed(json) => json.0.message.clone(),
            IpamError::NotFound(json) => json.0.message.clone(),
            IpamError::Conflict(json) => json.0.message.clone(),
            IpamError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            IpamError::ValidationFailed(json) => json.0.status_code,
            IpamError::NotFound(json) => json.0.status_code,
            IpamError::Conflict(json) => json.0.status_code,
            IpamError::InternalError(json) => json.0.status_code,
        }
    }
}

impl From<InternalError> for IpamError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for IpamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
