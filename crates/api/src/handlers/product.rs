//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use katalog_core::error::CoreError;
use katalog_core::messages;
use katalog_core::types::DbId;
use katalog_db::models::product::{CreateProduct, UpdateProduct};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::Envelope;
use crate::state::AppState;

const ENTITY: &str = "Product";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /products
///
/// List every product. An empty table answers 404 `Product Kosong`.
pub async fn list_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = state.store.list().await?;

    if products.is_empty() {
        return Err(AppError::Core(CoreError::Empty { entity: ENTITY }));
    }

    Ok(Envelope::list(StatusCode::OK, products, messages::FOUND))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Envelope::new(StatusCode::OK, product, messages::FOUND))
}

/// POST /products
///
/// Validate the payload and insert it. Every field is required and strings
/// must be non-empty.
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    let new_product = input.into_new()?;
    let product = state.store.create(&new_product).await?;

    tracing::info!(
        product_id = product.id,
        code = %product.code,
        price = %product.price,
        "Product created",
    );

    Ok(Envelope::new(StatusCode::CREATED, product, messages::CREATED))
}

/// PUT /products/{id}
///
/// Apply the provided fields; absent or empty ones keep their stored value.
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let changes = input.normalize()?;
    let product = state
        .store
        .update(id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, "Product updated");

    Ok(Envelope::new(StatusCode::OK, product, messages::UPDATED))
}

/// DELETE /products/{id}
///
/// Responds with the contents of the removed row.
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = state
        .store
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, code = %product.code, "Product deleted");

    Ok(Envelope::new(StatusCode::OK, product, messages::DELETED))
}
