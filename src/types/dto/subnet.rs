use poem_openapi::Object;

use crate::types::db::subnet;
use crate::types::dto::common::format_timestamp;
use crate::types::internal::subnet::SubnetFields;

/// Body of subnet create and update
#[derive(Object, Debug)]
pub struct SubnetRequest {
    /// Base address in dotted-decimal form, e.g. 10.0.0.0
    pub network: String,

    /// Prefix length, 0 to 32
    pub mask: i32,

    pub description: Option<String>,
}

impl From<SubnetRequest> for SubnetFields {
    fn from(request: SubnetRequest) -> Self {
        Self {
            network: request.network,
            mask: request.mask,
            description: request.description.unwrap_or_default(),
        }
    }
}

#[derive(Object, Debug)]
pub struct SubnetResponse {
    pub id: i64,
    pub network: String,
    pub mask: i32,

    /// network/mask notation
    pub cidr: String,
    pub description: String,

    /// Creation time (ISO 8601 format)
    pub created_at: String,
}

impl From<subnet::Model> for SubnetResponse {
    fn from(model: subnet::Model) -> Self {
        Self {
            cidr: format!("{}/{}", model.network, model.mask),
            id: model.id,
            network: model.network,
            mask: model.mask,
            description: model.description,
            created_at: format_timestamp(model.created_at),
        }
    }
}
