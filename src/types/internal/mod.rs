// Internal types - shared between stores, coordinators and the API layer
pub mod address;
pub mod audit;
pub mod context;
pub mod stats;
pub mod subnet;

pub use context::{RequestContext, RequestId};
