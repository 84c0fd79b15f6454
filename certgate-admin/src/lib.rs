pub mod api;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use certgate_core::{CertificateService, Services};
use poem::listener::TcpListener;
use poem::{Endpoint, EndpointExt, Route, Server};
use poem_openapi::{OpenApi, OpenApiService};
use tracing::*;

pub fn api_service() -> OpenApiService<impl OpenApi, ()> {
    OpenApiService::new(api::get(), "Certgate", env!("CARGO_PKG_VERSION")).server("/api/v1")
}

pub fn app(certificates: CertificateService) -> impl Endpoint {
    let api_service = api_service();
    let ui = api_service.stoplight_elements();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/api/v1", api_service)
        .nest("/api/v1/docs", ui)
        .at("/api/v1/openapi.json", spec)
        .with(poem::middleware::Tracing)
        .data(certificates)
}

pub struct AdminServer {
    services: Services,
}

impl AdminServer {
    pub fn new(services: &Services) -> Self {
        AdminServer {
            services: services.clone(),
        }
    }

    pub async fn run(self, address: SocketAddr) -> Result<()> {
        let app = app(self.services.certificates.clone());

        info!(?address, "Listening");
        Server::new(TcpListener::bind(address))
            .run(app)
            .await
            .context("Failed to start admin server")
    }
}
