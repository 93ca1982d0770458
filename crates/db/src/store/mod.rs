//! The product store abstraction injected into HTTP handlers.
//!
//! [`PgProductStore`] delegates to [`crate::repositories::ProductRepo`];
//! [`InMemoryProductStore`] keeps rows in process memory and backs the
//! HTTP integration tests and `STORE_BACKEND=memory`.

mod memory;
mod postgres;

use async_trait::async_trait;
use katalog_core::types::DbId;

use crate::models::product::{NewProduct, Product, UpdateProduct};

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

/// Result type shared by every store backend.
pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Data access for the `products` collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>>;

    /// Insert and return the row with its store-assigned id.
    async fn create(&self, input: &NewProduct) -> StoreResult<Product>;

    /// Apply the provided fields to the row matching `id`.
    ///
    /// Returns `None` when no row matched.
    async fn update(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>>;

    /// Remove the row matching `id`, returning what was removed.
    async fn delete(&self, id: DbId) -> StoreResult<Option<Product>>;

    /// Cheap connectivity check for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
