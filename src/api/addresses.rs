use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::api::helpers;
use crate::coordinators::ImportCoordinator;
use crate::errors::IpamError;
use crate::stores::AddressStore;
use crate::types::dto::address::{
    AddressRequest, AddressResponse, BulkCreateAddressesRequest, BulkCreateAddressesResponse,
    BulkDeleteAddressesRequest, BulkDeleteAddressesResponse, ImportAddressesRequest,
    ImportAddressesResponse,
};
use crate::types::dto::common::DeleteResponse;
use crate::types::internal::address::AddressFilter;

/// Address allocation endpoints
pub struct AddressesApi {
    address_store: Arc<AddressStore>,
    import_coordinator: Arc<ImportCoordinator>,
}

impl AddressesApi {
    pub fn new(address_store: Arc<AddressStore>, import_coordinator: Arc<ImportCoordinator>) -> Self {
        Self {
            address_store,
            import_coordinator,
        }
    }
}

#[derive(Tags)]
enum AddressTags {
    /// Address allocation
    Addresses,
}

#[OpenApi(prefix_path = "/addresses")]
impl AddressesApi {
    /// List address records in ascending address order
    #[oai(path = "/", method = "get", tag = "AddressTags::Addresses")]
    async fn list(
        &self,
        subnet_id: Query<Option<i64>>,
        occupied: Query<Option<bool>>,
        search: Query<Option<String>>,
    ) -> Result<Json<Vec<AddressResponse>>, IpamError> {
        let filter = AddressFilter {
            subnet_id: subnet_id.0,
            occupied: occupied.0,
            search: search.0,
        };
        let addresses = self.address_store.list(&filter).await?;
        Ok(Json(addresses.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/", method = "post", tag = "AddressTags::Addresses")]
    async fn create(&self, req: &Request, body: Json<AddressRequest>) -> Result<Json<AddressResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let created = self.address_store.create(&ctx, body.0.into()).await?;
        Ok(Json(created.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "AddressTags::Addresses")]
    async fn get(&self, id: Path<i64>) -> Result<Json<AddressResponse>, IpamError> {
        let address = self.address_store.get(id.0).await?;
        Ok(Json(address.into()))
    }

    #[oai(path = "/:id", method = "put", tag = "AddressTags::Addresses")]
    async fn update(
        &self,
        req: &Request,
        id: Path<i64>,
        body: Json<AddressRequest>,
    ) -> Result<Json<AddressResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let updated = self.address_store.update(&ctx, id.0, body.0.into()).await?;
        Ok(Json(updated.into()))
    }

    #[oai(path = "/:id", method = "delete", tag = "AddressTags::Addresses")]
    async fn delete(&self, req: &Request, id: Path<i64>) -> Result<Json<DeleteResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        self.address_store.delete(&ctx, id.0).await?;
        Ok(Json(DeleteResponse {
            success: true,
            message: format!("Address {} deleted", id.0),
        }))
    }

    /// Create every address of a range, skipping existing ones
    #[oai(path = "/bulk", method = "post", tag = "AddressTags::Addresses")]
    async fn bulk_create(
        &self,
        req: &Request,
        body: Json<BulkCreateAddressesRequest>,
    ) -> Result<Json<BulkCreateAddressesResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let outcome = self.address_store.bulk_create(&ctx, body.0.into()).await?;
        Ok(Json(outcome.into()))
    }

    /// Delete every existing address of a range
    #[oai(path = "/bulk-delete", method = "post", tag = "AddressTags::Addresses")]
    async fn bulk_delete(
        &self,
        req: &Request,
        body: Json<BulkDeleteAddressesRequest>,
    ) -> Result<Json<BulkDeleteAddressesResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let outcome = self.address_store.bulk_delete(&ctx, body.0.into()).await?;
        Ok(Json(outcome.into()))
    }

    /// Apply rows parsed from an import file
    #[oai(path = "/import", method = "post", tag = "AddressTags::Addresses")]
    async fn import(
        &self,
        req: &Request,
        body: Json<ImportAddressesRequest>,
    ) -> Result<Json<ImportAddressesResponse>, IpamError> {
        let ctx = helpers::create_request_context(req);
        let rows = body.0.rows.into_iter().map(Into::into).collect();
        let summary = self.import_coordinator.import_rows(&ctx, rows).await?;
        Ok(Json(summary.into()))
    }
}
