//! HTTP handlers for the org chart API

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crate::directory::DirectoryStore;
use crate::engine::{EngineError, EngineResult, Explorer, GraphResponse, NodeDetails};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Explorer shared by all requests; each call builds its own graph
pub type SharedExplorer = Arc<Explorer<dyn DirectoryStore>>;

/// Request for a free-text search
#[derive(Deserialize)]
pub struct SearchRequest {
    pub term: String,
}

/// Request for a candidate picked from a disambiguation list
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub unique_id: String,
}

/// Request to re-root on a clicked node
#[derive(Deserialize)]
pub struct VisitRequest {
    pub node: String,
}

#[derive(Deserialize)]
pub struct HomeParams {
    pub viewer: Option<String>,
}

#[derive(Deserialize)]
pub struct NodeParams {
    pub node: String,
}

/// Errors surfaced to API clients
#[derive(Debug)]
pub enum ApiError {
    /// Directory could not answer
    Unavailable(EngineError),
    NotFound(String),
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Unavailable(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unavailable(e) => {
                error!("Request failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Run a blocking explorer call off the async workers
async fn run_blocking<T, F>(explorer: SharedExplorer, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&Explorer<dyn DirectoryStore>) -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&explorer))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

/// Handler for free-text search
pub async fn search_handler(
    State(explorer): State<SharedExplorer>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    let response = run_blocking(explorer, move |e| e.search(&payload.term)).await?;
    Ok(Json(response))
}

/// Handler for disambiguation picks
pub async fn select_handler(
    State(explorer): State<SharedExplorer>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    let response = run_blocking(explorer, move |e| e.select_candidate(&payload.unique_id)).await?;
    Ok(Json(response))
}

/// Handler for node visits
pub async fn visit_handler(
    State(explorer): State<SharedExplorer>,
    Json(payload): Json<VisitRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    let response = run_blocking(explorer, move |e| e.visit_node(&payload.node)).await?;
    Ok(Json(response))
}

/// Handler for the landing tree
pub async fn home_handler(
    State(explorer): State<SharedExplorer>,
    Query(params): Query<HomeParams>,
) -> Result<Json<GraphResponse>, ApiError> {
    let response = run_blocking(explorer, move |e| e.home(params.viewer.as_deref())).await?;
    Ok(Json(response))
}

/// Handler for node details
pub async fn node_handler(
    State(explorer): State<SharedExplorer>,
    Query(params): Query<NodeParams>,
) -> Result<Json<NodeDetails>, ApiError> {
    let node = params.node.clone();
    match run_blocking(explorer, move |e| e.node_details(&params.node)).await? {
        Some(details) => Ok(Json(details)),
        None => Err(ApiError::NotFound(node)),
    }
}

/// Handler for system status
pub async fn status_handler(State(explorer): State<SharedExplorer>) -> impl IntoResponse {
    let config = explorer.config();
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "limits": {
            "maxDepth": config.max_depth,
            "maxNodes": config.max_nodes,
            "resultSize": config.result_size,
        }
    }))
}
