//! Router harness over the in-memory store.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use park_api::{app, AppState, MemoryParkStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryParkStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn seeded() -> Self {
        Self::with_store(MemoryParkStore::seeded())
    }

    pub fn empty() -> Self {
        Self::with_store(MemoryParkStore::new())
    }

    fn with_store(store: MemoryParkStore) -> Self {
        let state = AppState::new(Arc::new(store.clone()));
        TestApp { router: app(state), store }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send_to(self.router.clone(), request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None).await
    }
}

/// Drive one request through any router, e.g. one built over a custom `ParkStore`.
pub async fn send_to(router: Router, request: Request<Body>) -> TestResponse {
    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    };
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read response body: {err}"),
    };
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|err| panic!("response body is not JSON: {err}; body={:?}", bytes))
    };
    TestResponse { status, headers, body }
}

pub fn park_json(name: &str, category: &str, state: &str) -> Value {
    serde_json::json!({
        "name": name,
        "category": category,
        "state": state,
        "longitude": -121.56,
        "latitude": 44.37,
        "area": 2.5,
        "visitors": 750000,
        "estDate": "1964-08-01"
    })
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap_or_else(|| panic!("expected array, got {body}"))
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
