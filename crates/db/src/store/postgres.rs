use async_trait::async_trait;
use katalog_core::types::DbId;

use super::{ProductStore, StoreResult};
use crate::models::product::{NewProduct, Product, UpdateProduct};
use crate::repositories::ProductRepo;
use crate::DbPool;

/// [`ProductStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        ProductRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>> {
        ProductRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &NewProduct) -> StoreResult<Product> {
        ProductRepo::create(&self.pool, input).await
    }

    async fn update(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>> {
        ProductRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Product>> {
        ProductRepo::delete(&self.pool, id).await
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await
    }
}
