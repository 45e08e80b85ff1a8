use chrono::DateTime;
use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Response after a single-entity delete
#[derive(Object, Debug)]
pub struct DeleteResponse {
    pub success: bool,

    /// Human-readable message describing the result
    pub message: String,
}

/// Render stored unix seconds as RFC 3339
pub fn format_timestamp(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|at| at.to_rfc3339())
        .unwrap_or_default()
}
