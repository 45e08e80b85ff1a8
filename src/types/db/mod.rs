// Database entities - SeaORM models
pub mod audit_log;
pub mod ip_address;
pub mod subnet;
