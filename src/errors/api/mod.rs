// API-facing error types
pub mod ipam;

// Re-exports for convenience
pub use ipam::{IpamError, IpamErrorResponse};
