//! Product persistence: a store trait with PostgreSQL and in-memory backends.

use crate::error::StoreError;
use crate::model::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Mutex;

/// Persistence seam for the product table. The relational store is the
/// sole owner of durable state; implementations hold no per-request state.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, newest id first.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError>;
    /// Inserts with availability defaulting to true; the store assigns the id.
    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError>;
    /// Replaces name, price and availability. Returns None when the id is gone.
    async fn update(&self, id: i32, changes: ProductChanges)
        -> Result<Option<Product>, StoreError>;
    /// Returns false when the id did not exist.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

/// Idempotent schema sync, run once at startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id           SERIAL PRIMARY KEY,
            name         TEXT NOT NULL,
            price        DOUBLE PRECISION NOT NULL,
            availability BOOLEAN NOT NULL DEFAULT TRUE,
            created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Connection check used at startup.
pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) \
             RETURNING id, name, price, availability",
        )
        .bind(&new.name)
        .bind(new.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING id, name, price, availability",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(changes.availability)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store for tests and database-less local runs. Same ordering
/// and id-assignment contract as the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    rows: Vec<Product>,
    last_id: i32,
}

impl MemoryProductStore {
    fn locked(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Other("store mutex poisoned".into()))
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.locked()?;
        // Rows are kept in insertion (ascending id) order.
        Ok(inner.rows.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let inner = self.locked()?;
        Ok(inner.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.locked()?;
        inner.last_id += 1;
        let product = Product {
            id: inner.last_id,
            name: new.name,
            price: new.price,
            availability: true,
        };
        inner.rows.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.locked()?;
        let Some(row) = inner.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.name = changes.name;
        row.price = changes.price;
        row.availability = changes.availability;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.locked()?;
        let before = inner.rows.len();
        inner.rows.retain(|p| p.id != id);
        Ok(inner.rows.len() < before)
    }
}
