//! Tests for the responses produced by the middleware stack rather than by
//! the handlers: method mismatches, timeouts, panics and trailing slashes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{
    body_json, build_test_app, build_test_app_with_config, create_product, get, pen, send,
    test_config, test_store,
};
use katalog_core::types::DbId;
use katalog_db::models::product::{NewProduct, Product, UpdateProduct};
use katalog_db::store::{ProductStore, StoreResult};

/// A store whose every call either hangs past the request timeout or panics.
struct MisbehavingStore {
    panic: bool,
}

impl MisbehavingStore {
    async fn misbehave(&self) {
        if self.panic {
            panic!("store exploded");
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
    }
}

#[async_trait]
impl ProductStore for MisbehavingStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.misbehave().await;
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: DbId) -> StoreResult<Option<Product>> {
        self.misbehave().await;
        Ok(None)
    }

    async fn create(&self, _input: &NewProduct) -> StoreResult<Product> {
        self.misbehave().await;
        Err(sqlx::Error::RowNotFound)
    }

    async fn update(&self, _id: DbId, _input: &UpdateProduct) -> StoreResult<Option<Product>> {
        self.misbehave().await;
        Ok(None)
    }

    async fn delete(&self, _id: DbId) -> StoreResult<Option<Product>> {
        self.misbehave().await;
        Ok(None)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.misbehave().await;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 405
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unsupported_method_returns_405_envelope() {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/products/1")
        .body(Body::empty())
        .unwrap();

    let response = send(build_test_app(test_store()), request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], 405);
    assert_eq!(json["message"], "Method Not Allowed");
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn test_delete_on_collection_returns_405_envelope() {
    let request = Request::delete("/products").body(Body::empty()).unwrap();

    let response = send(build_test_app(test_store()), request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["code"], 405);
}

// ---------------------------------------------------------------------------
// 408
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_slow_request_returns_408_envelope() {
    let mut config = test_config();
    config.request_timeout_secs = 1;
    let app = build_test_app_with_config(Arc::new(MisbehavingStore { panic: false }), config);

    let response = get(app, "/products").await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["code"], 408);
    assert_eq!(json["message"], "Request Timeout");
}

// ---------------------------------------------------------------------------
// Panic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_handler_panic_returns_sanitized_500_envelope() {
    let app = build_test_app(Arc::new(MisbehavingStore { panic: true }));

    let response = get(app, "/products/1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], 500);
    assert_eq!(json["message"], "Internal Server Error");
    assert_eq!(json["data"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Trailing slash
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_trailing_slash_reaches_same_route() {
    let store = test_store();
    let created = create_product(&store, pen()).await;
    let id = created["id"].as_i64().unwrap();

    let list = get(build_test_app(Arc::clone(&store)), "/products/").await;
    assert_eq!(list.status(), StatusCode::OK);
    assert_eq!(body_json(list).await["count"], 1);

    let one = get(build_test_app(store), &format!("/products/{id}/")).await;
    assert_eq!(one.status(), StatusCode::OK);
    assert_eq!(body_json(one).await["data"]["id"], id);
}
