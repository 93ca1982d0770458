pub mod health;
pub mod product;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use katalog_core::messages;

use crate::response::Envelope;
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// /                  welcome text
/// /health            service health
/// /products          list, create
/// /products/{id}     get, update, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(health::router())
        .nest("/products", product::router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(fallback)
}

/// GET / -- plain-text greeting, not wrapped in the envelope.
async fn index() -> &'static str {
    messages::WELCOME
}

async fn fallback() -> Envelope<()> {
    Envelope::empty(StatusCode::NOT_FOUND, messages::GENERIC_NOT_FOUND)
}

async fn method_not_allowed() -> Envelope<()> {
    Envelope::empty(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
}
