//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{StoreBackend, StorefrontConfig};
use crate::db::{Database, MemoryStore, RepositoryError, Stores};
use crate::services::{CartService, CatalogService, CheckoutService, OrderHistory};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out services over
/// the configured stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    stores: Stores,
    database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state over explicit stores.
    ///
    /// `database` is the handle readiness checks probe; `None` means the
    /// stores need no external connection.
    #[must_use]
    pub fn new(stores: Stores, database: Option<Arc<Database>>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                stores,
                database,
            }),
        }
    }

    /// Create application state for the configured store backend.
    ///
    /// Does not connect: the `PostgreSQL` pool is established by the first
    /// request that needs it.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        match &config.store {
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let database = Arc::new(Database::new(database_url.clone(), *max_connections));
                let stores = Stores::postgres(&database);
                Self::new(stores, Some(database))
            }
            StoreBackend::Memory => {
                let stores = Stores::memory(&Arc::new(MemoryStore::new()));
                Self::new(stores, None)
            }
        }
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database cannot be reached.
    pub async fn check_ready(&self) -> Result<(), RepositoryError> {
        let Some(database) = &self.inner.database else {
            return Ok(());
        };
        let pool = database.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Catalog service over the product store.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.inner.stores.products.as_ref())
    }

    /// Cart service over the cart and product stores.
    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        let stores = &self.inner.stores;
        CartService::new(stores.carts.as_ref(), stores.products.as_ref())
    }

    /// Checkout service over all three stores.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        let stores = &self.inner.stores;
        CheckoutService::new(
            stores.carts.as_ref(),
            stores.orders.as_ref(),
            stores.products.as_ref(),
        )
    }

    /// Order history over the order store.
    #[must_use]
    pub fn orders(&self) -> OrderHistory<'_> {
        OrderHistory::new(self.inner.stores.orders.as_ref())
    }
}
