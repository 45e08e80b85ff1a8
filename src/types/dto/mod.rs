// DTOs - request and response bodies of the HTTP API
pub mod address;
pub mod audit;
pub mod common;
pub mod stats;
pub mod subnet;
