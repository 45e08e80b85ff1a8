use std::sync::Arc;

use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use crate::api::{AddressesApi, AuditApi, HealthApi, StatsApi, SubnetsApi};
use crate::app_data::AppData;
use crate::config::{BootstrapSettings, DatabaseConnections};
use crate::coordinators::ImportCoordinator;

/// Compose the API under /api and Swagger UI under /swagger
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let import_coordinator = Arc::new(ImportCoordinator::new(app_data.clone()));

    let apis = (
        HealthApi,
        SubnetsApi::new(app_data.subnet_store.clone()),
        AddressesApi::new(app_data.address_store.clone(), import_coordinator),
        StatsApi::new(app_data.stats_store.clone()),
        AuditApi::new(app_data.audit_store.clone()),
    );

    let api_service = OpenApiService::new(apis, "IPAM API", env!("CARGO_PKG_VERSION"))
        .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
}

/// Connect, migrate and serve until the process is stopped
pub async fn run_server(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    let app_data = Arc::new(AppData::new(connections, settings));

    let address = settings.server_address();
    let server_url = format!("http://{}/api", address);
    let app = build_routes(app_data, &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address))
        .run(app)
        .await?;

    Ok(())
}
