use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use orgraph::http::{router, SharedExplorer};
use orgraph::{
    CustomRecord, DirectoryError, DirectoryResult, DirectoryStore, EngineConfig, Explorer, Field,
    Identity, MemoryDirectory, Table,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn shared(store: Arc<dyn DirectoryStore>) -> SharedExplorer {
    Arc::new(Explorer::new(store, EngineConfig::default()))
}

fn sample_explorer() -> SharedExplorer {
    let mut dir = MemoryDirectory::new();
    dir.insert(Identity::new("E0_David_Walker", "David Walker").with_org_unit("Executive"));
    dir.insert(Identity::new("E1_Alice_Smith", "Alice Smith").with_manager("E0_David_Walker").with_title("Director"));
    dir.insert(Identity::new("E2_Alice_Wong", "Alice Wong").with_manager("E0_David_Walker"));
    shared(Arc::new(dir))
}

async fn send(explorer: SharedExplorer, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(explorer).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_search_returns_graph() {
    let (status, body) = send(sample_explorer(), post("/api/search", json!({ "term": "Alice Smith" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "tree");
    assert_eq!(body["truncated"], false);
    let ids: Vec<&str> = body["nodes"].as_array().unwrap().iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["Reports To: David_Walker", "Alice_Smith"]);
    assert_eq!(body["links"][0]["source"], "Alice_Smith");
    assert_eq!(body["links"][0]["value"], 1.0);
}

#[tokio::test]
async fn test_ambiguous_search_then_select() {
    let explorer = sample_explorer();
    let (_, body) = send(explorer.clone(), post("/api/search", json!({ "term": "Alice" }))).await;
    assert_eq!(body["kind"], "disambiguation");
    assert_eq!(body["candidates"][1]["displayName"], "Alice Wong");

    let (status, body) = send(explorer, post("/api/select", json!({ "uniqueId": "E2_Alice_Wong" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"][1]["id"], "Alice_Wong");
}

#[tokio::test]
async fn test_visit_and_home() {
    let explorer = sample_explorer();
    let (_, visited) = send(explorer.clone(), post("/api/visit", json!({ "node": "Reports To: David_Walker" }))).await;
    assert_eq!(visited["nodes"][0]["id"], "David_Walker");
    assert_eq!(visited["nodes"].as_array().unwrap().len(), 3);

    let (status, home) = send(explorer, get("/api/home?viewer=Nobody")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["nodes"][0]["group"], 0);
}

#[tokio::test]
async fn test_node_details() {
    let explorer = sample_explorer();
    let (status, body) = send(explorer.clone(), get("/api/node?node=Alice_Smith")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Director");
    assert_eq!(body["reportsTo"], "E0_David_Walker");

    let (status, body) = send(explorer, get("/api/node?node=Nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Nobody"));
}

#[tokio::test]
async fn test_status_reports_limits() {
    let (status, body) = send(sample_explorer(), get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["limits"]["maxDepth"], 5);
    assert_eq!(body["limits"]["maxNodes"], 100);
}

struct OfflineDirectory;

impl DirectoryStore for OfflineDirectory {
    fn find_by_field(&self, _term: &str, _field: Field, _table: Table) -> DirectoryResult<Vec<Identity>> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    fn custom_record(&self, _user: &str) -> DirectoryResult<Option<CustomRecord>> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_unavailable_directory_maps_to_503() {
    let (status, body) = send(shared(Arc::new(OfflineDirectory)), post("/api/search", json!({ "term": "Alice" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
