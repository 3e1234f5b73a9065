//! In-process store implementing every store trait.
//!
//! Backs the `memory` store backend for local development and the service
//! and route tests. Failure switches let tests force individual operations
//! to return `RepositoryError::Connection`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vibe_commerce_core::{LineItemId, ProductId, SessionId};

use super::{CartStore, OrderStore, ProductStore, RepositoryError};
use crate::models::{Cart, CartLineItem, Order, Product};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    ProductReads,
    CartReads,
    CartWrites,
    CartDelete,
    OrderInsert,
    OrderReads,
}

/// In-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    carts: RwLock<HashMap<SessionId, Vec<CartLineItem>>>,
    orders: RwLock<Vec<Order>>,
    failing: RwLock<Vec<FailPoint>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `point` fail (or succeed again) on subsequent calls.
    pub async fn set_failing(&self, point: FailPoint, fail: bool) {
        let mut failing = self.failing.write().await;
        failing.retain(|p| *p != point);
        if fail {
            failing.push(point);
        }
    }

    /// Number of stored orders across all sessions.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Whether a cart document exists for `session`.
    pub async fn has_cart(&self, session: &SessionId) -> bool {
        self.carts.read().await.contains_key(session)
    }

    async fn check(&self, point: FailPoint) -> Result<(), RepositoryError> {
        if self.failing.read().await.contains(&point) {
            return Err(RepositoryError::Connection(format!(
                "injected failure: {point:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn count(&self) -> Result<u64, RepositoryError> {
        self.check(FailPoint::ProductReads).await?;
        let len = self.products.read().await.len();
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn insert_many(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        let mut stored = self.products.write().await;
        let mut inserted = 0;
        for product in products {
            if stored.iter().all(|p| p.id != product.id) {
                stored.push(product.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.check(FailPoint::ProductReads).await?;
        Ok(self.products.read().await.clone())
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.check(FailPoint::ProductReads).await?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find(&self, session: &SessionId) -> Result<Option<Cart>, RepositoryError> {
        self.check(FailPoint::CartReads).await?;
        Ok(self.carts.read().await.get(session).map(|items| Cart {
            session_id: session.clone(),
            items: items.clone(),
        }))
    }

    async fn push_item(
        &self,
        session: &SessionId,
        item: &CartLineItem,
    ) -> Result<(), RepositoryError> {
        self.check(FailPoint::CartWrites).await?;
        self.carts
            .write()
            .await
            .entry(session.clone())
            .or_default()
            .push(item.clone());
        Ok(())
    }

    async fn pull_item(
        &self,
        session: &SessionId,
        item_id: &LineItemId,
    ) -> Result<(), RepositoryError> {
        self.check(FailPoint::CartWrites).await?;
        if let Some(items) = self.carts.write().await.get_mut(session) {
            items.retain(|item| &item.id != item_id);
        }
        Ok(())
    }

    async fn delete(&self, session: &SessionId) -> Result<bool, RepositoryError> {
        self.check(FailPoint::CartDelete).await?;
        Ok(self.carts.write().await.remove(session).is_some())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        self.check(FailPoint::OrderInsert).await?;
        self.orders.write().await.push(order.clone());
        Ok(())
    }

    async fn list_for_session(&self, session: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        self.check(FailPoint::OrderReads).await?;
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| &o.session_id == session)
            .cloned()
            .collect();
        // Newest first; among equal timestamps the later insert wins.
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
