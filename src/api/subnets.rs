use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::IpamError;
use crate::stores::SubnetStore;
use crate::types::dto::common::DeleteResponse;
use crate::types::dto::subnet::{SubnetRequest, SubnetResponse};

/// Subnet registry endpoints
pub struct SubnetsApi {
    subnet_store: Arc<SubnetStore>,
}

impl SubnetsApi {
    pub fn new(subnet_store: Arc<SubnetStore>) -> Self {
        Self { subnet_store }
    }
}

#[derive(Tags)]
enum SubnetTags {
    /// Subnet registry
    Subnets,
}

#[OpenApi(prefix_path = "/subnets")]
impl SubnetsApi {
    /// List subnets, newest first
    #[oai(path = "/", method = "get", tag = "SubnetTags::Subnets")]
    async fn list(&self) -> Result<Json<Vec<SubnetResponse>>, IpamError> {
        let subnets = self.subnet_store.list().await?;
        Ok(Json(subnets.into_iter().map(Into::into).collect()))
    }

    /// Declare a subnet
    #[oai(path = "/", method = "post", tag = "SubnetTags::Subnets")]
    async fn create(&self, req: &Request, body: Json<SubnetRequest>) -> Result<Json<SubnetResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let created = self.subnet_store.create(&ctx, body.0.into()).await?;
        Ok(Json(created.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "SubnetTags::Subnets")]
    async fn get(&self, id: Path<i64>) -> Result<Json<SubnetResponse>, IpamError> {
        let subnet = self.subnet_store.get(id.0).await?;
        Ok(Json(subnet.into()))
    }

    #[oai(path = "/:id", method = "put", tag = "SubnetTags::Subnets")]
    async fn update(
        &self,
        req: &Request,
        id: Path<i64>,
        body: Json<SubnetRequest>,
    ) -> Result<Json<SubnetResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let updated = self.subnet_store.update(&ctx, id.0, body.0.into()).await?;
        Ok(Json(updated.into()))
    }

    /// Delete a subnet; its addresses are kept and detached
    #[oai(path = "/:id", method = "delete", tag = "SubnetTags::Subnets")]
    async fn delete(&self, req: &Request, id: Path<i64>) -> Result<Json<DeleteResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        self.subnet_store.delete(&ctx, id.0).await?;
        Ok(Json(DeleteResponse {
            success: true,
            message: format!("Subnet {} deleted", id.0),
        }))
    }
}
