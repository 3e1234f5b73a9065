//! Product catalog repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use vibe_commerce_core::ProductId;

use super::{Database, ProductStore, RepositoryError};
use crate::models::Product;

/// `PostgreSQL` product store.
pub struct PgProductStore {
    db: Arc<Database>,
}

impl PgProductStore {
    /// Create a new product store.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn count(&self) -> Result<u64, RepositoryError> {
        let pool = self.db.pool().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn insert_many(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let pool = self.db.pool().await?;
        let mut tx = pool.begin().await?;
        let mut inserted = 0u64;

        // New products go after the existing catalog in store order.
        let (next,): (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(position) + 1, 0) FROM products")
                .fetch_one(&mut *tx)
                .await?;

        for (offset, product) in products.iter().enumerate() {
            let position = i32::try_from(offset)
                .ok()
                .and_then(|offset| next.checked_add(offset))
                .ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "product position overflow at offset {offset}"
                    ))
                })?;
            let result = sqlx::query(
                r"
                INSERT INTO products
                    (id, name, price, category, description, image, in_stock, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO NOTHING
                ",
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.category)
            .bind(&product.description)
            .bind(&product.image)
            .bind(product.in_stock)
            .bind(position)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        debug!(inserted, "Inserted products");
        Ok(inserted)
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let pool = self.db.pool().await?;
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, category, description, image, in_stock
            FROM products
            ORDER BY position, id
            ",
        )
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let pool = self.db.pool().await?;
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, category, description, image, in_stock
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }
}
