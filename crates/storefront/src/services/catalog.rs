//! Product catalog service.
//!
//! The catalog is read-only except for the first listing against an empty
//! store, which inserts the fixed seed set. The emptiness check and the insert
//! are separate calls, so two concurrent first listings may both seed; the
//! stores ignore products whose id already exists.

use tracing::{info, instrument};

use vibe_commerce_core::ProductId;

use crate::db::{ProductStore, RepositoryError};
use crate::models::product::seed_catalog;
use crate::models::{Product, ProductQuery};

/// Catalog accessor.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Seed the fixed catalog if the store has no products.
    ///
    /// Returns the number of products inserted (0 when already seeded).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read or written.
    #[instrument(skip(self))]
    pub async fn ensure_seeded(&self) -> Result<u64, RepositoryError> {
        if self.products.count().await? > 0 {
            return Ok(0);
        }

        let inserted = self.products.insert_many(&seed_catalog()).await?;
        info!(inserted, "Seeded product catalog");
        Ok(inserted)
    }

    /// List products, seeding first if the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read or seeded.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        self.ensure_seeded().await?;
        let products = self.products.list().await?;
        Ok(query.apply(products))
    }

    /// Look up a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read.
    pub async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.products.find(id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_first_listing_seeds_catalog() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let products = catalog
            .list_products(&ProductQuery::default())
            .await
            .unwrap_or_default();
        assert_eq!(products, seed_catalog());
    }

    #[tokio::test]
    async fn test_second_listing_does_not_duplicate() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        catalog.list_products(&ProductQuery::default()).await.ok();
        let again = catalog
            .list_products(&ProductQuery::default())
            .await
            .unwrap_or_default();

        assert_eq!(again.len(), 8);
        assert!(matches!(catalog.ensure_seeded().await, Ok(0)));
    }

    #[tokio::test]
    async fn test_existing_catalog_is_not_reseeded() {
        let store = MemoryStore::new();
        let custom = seed_catalog().into_iter().take(2).collect::<Vec<_>>();
        store.insert_many(&custom).await.ok();

        let listed = CatalogService::new(&store)
            .list_products(&ProductQuery::default())
            .await
            .unwrap_or_default();
        assert_eq!(listed, custom);
    }

    #[tokio::test]
    async fn test_find_product() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        catalog.ensure_seeded().await.ok();

        let found = catalog.find_product(&ProductId::new("3")).await.ok().flatten();
        assert_eq!(found.map(|p| p.name), Some("Professional Camera".to_string()));

        let missing = catalog.find_product(&ProductId::new("999")).await.ok().flatten();
        assert!(missing.is_none());
    }
}
