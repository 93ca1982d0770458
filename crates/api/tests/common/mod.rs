#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use http_body_util::BodyExt;
use katalog_api::config::{LogFormat, ServerConfig, StoreBackend};
use katalog_api::router::{build_app_router, App};
use katalog_api::state::AppState;
use katalog_db::store::{InMemoryProductStore, ProductStore};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        log_format: LogFormat::Text,
    }
}

/// A fresh in-memory store, shared across the apps built from it.
pub fn test_store() -> Arc<dyn ProductStore> {
    Arc::new(InMemoryProductStore::new())
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given store.
pub fn build_test_app(store: Arc<dyn ProductStore>) -> App {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn ProductStore>, config: ServerConfig) -> App {
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

pub async fn send(app: App, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: App, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: App, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

/// Send a request with a raw body and a JSON content type.
pub async fn send_raw(app: App, method: Method, uri: &str, body: &str) -> Response<Body> {
    send_with_content_type(app, method, uri, Some("application/json"), body).await
}

/// Send a request with a raw body and the given content type, or none.
pub async fn send_with_content_type(
    app: App,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn post_json(app: App, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::POST, uri, &json.to_string()).await
}

pub async fn put_json(app: App, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::PUT, uri, &json.to_string()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a product through the API and return the envelope's `data`.
pub async fn create_product(
    store: &Arc<dyn ProductStore>,
    json: serde_json::Value,
) -> serde_json::Value {
    let response = post_json(build_test_app(Arc::clone(store)), "/products", json).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

pub fn pen() -> serde_json::Value {
    serde_json::json!({
        "code": "P1",
        "name": "Pen",
        "price": "1.50",
        "deskripsi": "blue pen",
    })
}
