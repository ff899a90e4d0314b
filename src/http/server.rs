//! HTTP server exposing the org chart API

use axum::{
    routing::{get, post},
    Router,
};
use crate::config::ServerConfig;
use tower_http::cors::CorsLayer;
use tracing::info;
use super::handler::{
    home_handler, node_handler, search_handler, select_handler, status_handler, visit_handler,
    SharedExplorer,
};

/// Build the API router over a shared explorer
pub fn router(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/search", post(search_handler))
        .route("/api/select", post(select_handler))
        .route("/api/visit", post(visit_handler))
        .route("/api/home", get(home_handler))
        .route("/api/node", get(node_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(explorer)
}

/// HTTP server serving graphs to the front end
pub struct HttpServer {
    explorer: SharedExplorer,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(explorer: SharedExplorer, config: ServerConfig) -> Self {
        Self { explorer, config }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.explorer.clone());

        let addr = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Org chart API available at http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
