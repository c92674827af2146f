mod support;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use park_api::{app, AppError, AppState, Park, ParkFilter, ParkInput, ParkStore};
use std::sync::Arc;
use support::{send_to, TestApp};

/// Store whose database is unreachable.
struct UnreachableStore;

fn store_down() -> AppError {
    AppError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ParkStore for UnreachableStore {
    async fn list(&self, _: &ParkFilter) -> Result<Vec<Park>, AppError> {
        Err(store_down())
    }
    async fn get(&self, _: i32) -> Result<Option<Park>, AppError> {
        Err(store_down())
    }
    async fn insert(&self, _: &ParkInput) -> Result<Park, AppError> {
        Err(store_down())
    }
    async fn current_version(&self, _: i32) -> Result<Option<i64>, AppError> {
        Err(store_down())
    }
    async fn update(&self, _: i32, _: &ParkInput, _: i64) -> Result<bool, AppError> {
        Err(store_down())
    }
    async fn delete(&self, _: i32) -> Result<bool, AppError> {
        Err(store_down())
    }
    async fn exists(&self, _: i32) -> Result<bool, AppError> {
        Err(store_down())
    }
    async fn ping(&self) -> Result<(), AppError> {
        Err(store_down())
    }
}

async fn get_unreachable(uri: &str) -> support::TestResponse {
    let router = app(AppState::new(Arc::new(UnreachableStore)));
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send_to(router, request).await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::empty();
    let res = app.get("/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn ready_pings_the_store() {
    let app = TestApp::empty();
    let res = app.get("/ready").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["database"], "ok");
}

#[tokio::test]
async fn ready_reports_degraded_when_store_is_down() {
    let res = get_unreachable("/ready").await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["status"], "degraded");
    assert_eq!(res.body["database"], "unavailable");
}

#[tokio::test]
async fn health_does_not_touch_the_store() {
    let res = get_unreachable("/health").await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn store_failure_is_a_database_error() {
    let res = get_unreachable("/api/parks").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"]["code"], "database_error");
}

#[tokio::test]
async fn version_and_info_name_the_crate() {
    let app = TestApp::empty();
    for path in ["/version", "/info"] {
        let res = app.get(path).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["name"], "park-api");
        assert_eq!(res.body["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::empty();
    let res = app.get("/openapi.json").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["info"]["title"], "ParkApi");
    assert!(res.body["paths"]["/api/parks/{id}"]["put"].is_object());
    assert!(res.body["paths"]["/api/parks"]["get"]["parameters"].is_array());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = TestApp::empty();
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("origin", "https://example.org")
        .body(Body::empty())
        .unwrap();
    let res = app.send(request).await;
    assert_eq!(res.headers["access-control-allow-origin"], "*");
}
