//! Store layer for the storefront.
//!
//! # Database: `vibe_commerce`
//!
//! `PostgreSQL` is used as a document store:
//!
//! ## Tables
//!
//! - `products` - Catalog, seeded once when empty
//! - `carts` - One row per session, line items in a JSONB array
//! - `orders` - Immutable order records with a JSONB item snapshot
//!
//! Every cart mutation is a single statement against one row, so concurrent
//! add/remove calls for the same session never interleave mid-update.
//! Checkout's insert-then-delete is deliberately two statements.
//!
//! # Backends
//!
//! - [`PgProductStore`], [`PgCartStore`], [`PgOrderStore`] - share one lazily
//!   connected [`Database`]
//! - [`MemoryStore`] - in-process implementation of all three traits
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p vibe-commerce-cli -- migrate
//! ```

pub mod carts;
pub mod memory;
pub mod orders;
pub mod products;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::sync::OnceCell;

use vibe_commerce_core::{LineItemId, ProductId, SessionId};

use crate::models::{Cart, CartLineItem, Order, Product};

pub use carts::PgCartStore;
pub use memory::MemoryStore;
pub use orders::PgOrderStore;
pub use products::PgProductStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Read-only product catalog access.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of stored products.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Insert products in the given order. Existing ids are left untouched.
    async fn insert_many(&self, products: &[Product]) -> Result<u64, RepositoryError>;

    /// All products in store order.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Look up one product.
    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
}

/// Per-session cart documents.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetch the cart document, if any.
    async fn find(&self, session: &SessionId) -> Result<Option<Cart>, RepositoryError>;

    /// Append a line item, creating the cart if needed.
    async fn push_item(
        &self,
        session: &SessionId,
        item: &CartLineItem,
    ) -> Result<(), RepositoryError>;

    /// Remove a line item by id. Unknown ids and missing carts are no-ops.
    async fn pull_item(&self, session: &SessionId, item_id: &LineItemId)
    -> Result<(), RepositoryError>;

    /// Delete the whole cart document. Returns whether one existed.
    async fn delete(&self, session: &SessionId) -> Result<bool, RepositoryError>;
}

/// Append-only order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    async fn insert(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Orders for a session, newest first.
    async fn list_for_session(&self, session: &SessionId) -> Result<Vec<Order>, RepositoryError>;
}

/// The three stores the services run against.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn ProductStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl Stores {
    /// `PostgreSQL`-backed stores sharing one lazily connected database.
    #[must_use]
    pub fn postgres(database: &Arc<Database>) -> Self {
        Self {
            products: Arc::new(PgProductStore::new(Arc::clone(database))),
            carts: Arc::new(PgCartStore::new(Arc::clone(database))),
            orders: Arc::new(PgOrderStore::new(Arc::clone(database))),
        }
    }

    /// In-memory stores backed by a single [`MemoryStore`].
    #[must_use]
    pub fn memory(store: &Arc<MemoryStore>) -> Self {
        Self {
            products: Arc::clone(store) as Arc<dyn ProductStore>,
            carts: Arc::clone(store) as Arc<dyn CartStore>,
            orders: Arc::clone(store) as Arc<dyn OrderStore>,
        }
    }
}

/// Process-wide database handle, connected on first use.
///
/// Concurrent first callers wait on a single connection attempt. A failed
/// attempt leaves the cell empty: every waiting caller sees an error and the
/// next call tries again.
pub struct Database {
    url: SecretString,
    max_connections: u32,
    pool: OnceCell<PgPool>,
}

impl Database {
    /// Create an unconnected handle.
    #[must_use]
    pub fn new(url: SecretString, max_connections: u32) -> Self {
        Self {
            url,
            max_connections,
            pool: OnceCell::new(),
        }
    }

    /// Get the pool, connecting if this is the first successful call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the database cannot be reached.
    pub async fn pool(&self) -> Result<&PgPool, RepositoryError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = create_pool(&self.url, self.max_connections)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, "Failed to connect to database");
                        RepositoryError::Connection(e.to_string())
                    })?;
                tracing::info!("Connected to database");
                Ok(pool)
            })
            .await
    }

    /// Whether a connection has been established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
