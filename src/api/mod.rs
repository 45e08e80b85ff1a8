// API layer - HTTP endpoints
pub mod addresses;
pub mod audit;
pub mod health;
pub mod helpers;
pub mod stats;
pub mod subnets;


pub use addresses::AddressesApi;
pub use audit::AuditApi;
pub use health::HealthApi;
pub use stats::StatsApi;
pub use subnets::SubnetsApi;
