use std::collections::BTreeMap;

use async_trait::async_trait;
use katalog_core::types::DbId;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;

use super::{ProductStore, StoreResult};
use crate::models::product::{NewProduct, Product, UpdateProduct, PRICE_SCALE};

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Product>,
}

/// [`ProductStore`] that keeps rows in process memory.
///
/// Ids start at 1 and are never reused, matching a `BIGSERIAL` column.
/// Prices are rounded half away from zero to two decimals, as
/// PostgreSQL does for `NUMERIC(16, 2)`.
#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_scale(price: Decimal) -> Decimal {
    let mut rounded =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn create(&self, input: &NewProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = chrono::Utc::now();
        let product = Product {
            id: inner.last_id,
            code: input.code.clone(),
            name: input.name.clone(),
            price: to_scale(input.price),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(code) = &input.code {
            row.code = code.clone();
        }
        if let Some(name) = &input.name {
            row.name = name.clone();
        }
        if let Some(price) = input.price {
            row.price = to_scale(price);
        }
        if let Some(description) = &input.description {
            row.description = description.clone();
        }
        row.updated_at = chrono::Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn pen() -> NewProduct {
        NewProduct {
            code: "P1".into(),
            name: "Pen".into(),
            price: Decimal::from_str("1.5").unwrap(),
            description: "blue pen".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = InMemoryProductStore::new();
        let a = store.create(&pen()).await.unwrap();
        let b = store.create(&pen()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryProductStore::new();
        let a = store.create(&pen()).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(&pen()).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn price_is_stored_with_two_decimals() {
        let store = InMemoryProductStore::new();
        let created = store.create(&pen()).await.unwrap();
        assert_eq!(created.price.to_string(), "1.50");

        let input = UpdateProduct {
            price: Some(Decimal::from_str("2.345").unwrap()),
            ..Default::default()
        };
        let updated = store.update(created.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.price.to_string(), "2.35");
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let store = InMemoryProductStore::new();
        let created = store.create(&pen()).await.unwrap();

        let input = UpdateProduct {
            name: Some("Pencil".into()),
            ..Default::default()
        };
        let updated = store.update(created.id, &input).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Pencil");
        assert_eq!(updated.code, "P1");
        assert_eq!(updated.description, "blue pen");
    }

    #[tokio::test]
    async fn missing_rows_yield_none() {
        let store = InMemoryProductStore::new();
        assert!(store.find_by_id(42).await.unwrap().is_none());
        assert!(store
            .update(42, &UpdateProduct::default())
            .await
            .unwrap()
            .is_none());
        assert!(store.delete(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = InMemoryProductStore::new();
        for _ in 0..3 {
            store.create(&pen()).await.unwrap();
        }
        let ids: Vec<DbId> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
