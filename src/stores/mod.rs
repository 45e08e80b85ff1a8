// Stores layer - Data access and repository pattern
pub mod address_store;
pub mod audit_store;
mod filters;
pub mod stats_store;
pub mod subnet_store;

pub use address_store::AddressStore;
pub use audit_store::AuditStore;
pub use stats_store::StatsStore;
pub use subnet_store::SubnetStore;
