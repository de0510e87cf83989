#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use strata_api::config::{ServerConfig, StoreBackend};
use strata_api::router::build_app_router;
use strata_api::state::AppState;
use strata_core::MemoryStore;
use strata_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
    }
}

/// Everything a test needs to drive the app and inspect its storage.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub event_bus: Arc<EventBus>,
}

/// Build the full application router with all middleware layers on top of a
/// fresh in-memory store.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let event_bus = Arc::new(EventBus::default());

    let state = AppState::new(
        Arc::new(config.clone()),
        store.clone(),
        None,
        Arc::clone(&event_bus),
    );

    TestApp {
        router: build_app_router(state, &config),
        store,
        event_bus,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
