//! Session cart service.
//!
//! Adds never merge: adding the same product twice produces two line items
//! with distinct ids. Product existence is not checked on add; a dangling
//! reference shows up as `product: null` with a zero contribution to the
//! total on read.

use tracing::{debug, instrument};

use vibe_commerce_core::{LineItemId, ProductId, Quantity, SessionId};

use super::{ServiceError, ValidationError};
use crate::db::{CartStore, ProductStore, RepositoryError};
use crate::models::{CartLineItem, CartView, EnrichedLineItem};

/// Raw add-to-cart input as received from the client.
#[derive(Debug, Clone, Default)]
pub struct AddItem {
    pub product_id: Option<String>,
    pub qty: Option<i64>,
}

impl AddItem {
    /// Validate into a product reference and quantity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the product id is blank or the quantity is
    /// missing or below 1.
    pub fn validate(self) -> Result<(ProductId, Quantity), ValidationError> {
        let product_id = self
            .product_id
            .filter(|id| !id.trim().is_empty())
            .map(ProductId::from)
            .ok_or(ValidationError::MissingProductId)?;
        let qty = self
            .qty
            .ok_or_else(|| ValidationError::InvalidQuantity("qty is required".to_string()))?;

        Ok((product_id, Quantity::new(qty)?))
    }
}

/// Cart store operations for one session at a time.
pub struct CartService<'a> {
    carts: &'a dyn CartStore,
    products: &'a dyn ProductStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(carts: &'a dyn CartStore, products: &'a dyn ProductStore) -> Self {
        Self { carts, products }
    }

    /// Fetch the session's cart with products joined in and the total.
    ///
    /// A missing cart reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart or a product lookup fails.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn get_cart(&self, session: &SessionId) -> Result<CartView, RepositoryError> {
        let Some(cart) = self.carts.find(session).await? else {
            return Ok(CartView::empty());
        };

        let items = enrich(self.products, cart.items).await?;
        Ok(CartView::new(items))
    }

    /// Number of line items in the session's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read.
    pub async fn count(&self, session: &SessionId) -> Result<usize, RepositoryError> {
        Ok(self
            .carts
            .find(session)
            .await?
            .map_or(0, |cart| cart.items.len()))
    }

    /// Append a new line item to the session's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for bad input (nothing is written)
    /// and `ServiceError::Repository` if the store write fails.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn add_item(
        &self,
        session: &SessionId,
        input: AddItem,
    ) -> Result<CartLineItem, ServiceError> {
        let (product_id, qty) = input.validate()?;
        let item = CartLineItem::new(product_id, qty);

        self.carts.push_item(session, &item).await?;
        debug!(item_id = %item.id, product_id = %item.product_id, qty = %item.qty, "Added to cart");
        Ok(item)
    }

    /// Remove a line item. Unknown ids succeed without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    #[instrument(skip(self), fields(session = %session, item_id = %item_id))]
    pub async fn remove_item(
        &self,
        session: &SessionId,
        item_id: &LineItemId,
    ) -> Result<(), RepositoryError> {
        self.carts.pull_item(session, item_id).await
    }
}

/// Join each line item with its current catalog record.
///
/// # Errors
///
/// Returns `RepositoryError` if a product lookup fails. A product that does
/// not exist is not an error.
pub async fn enrich(
    products: &dyn ProductStore,
    items: Vec<CartLineItem>,
) -> Result<Vec<EnrichedLineItem>, RepositoryError> {
    let mut enriched = Vec::with_capacity(items.len());
    for item in items {
        let product = products.find(&item.product_id).await?;
        enriched.push(EnrichedLineItem { item, product });
    }
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::db::MemoryStore;
    use crate::db::memory::FailPoint;
    use crate::models::Product;

    use super::*;

    fn add(product_id: &str, qty: i64) -> AddItem {
        AddItem {
            product_id: Some(product_id.to_string()),
            qty: Some(qty),
        }
    }

    fn priced(id: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            price,
            category: "Test".to_string(),
            description: String::new(),
            image: String::new(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_missing_cart_reads_empty() {
        let store = MemoryStore::new();
        let service = CartService::new(&store, &store);

        let cart = service.get_cart(&SessionId::new("nobody")).await;
        assert!(matches!(cart, Ok(ref view) if *view == CartView::empty()));
        assert_eq!(service.count(&SessionId::new("nobody")).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn test_add_then_get_includes_item() {
        let store = MemoryStore::new();
        store.insert_many(&[priced("p1", dec!(12.50))]).await.ok();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");

        service.add_item(&session, add("p1", 2)).await.ok();
        let cart = service.get_cart(&session).await.unwrap_or_else(|_| CartView::empty());

        assert_eq!(cart.items.len(), 1);
        let line = cart.items.first().map(|l| (&l.item.product_id, l.item.qty.get()));
        assert_eq!(line, Some((&ProductId::new("p1"), 2)));
        assert_eq!(cart.total, dec!(25.00));
    }

    #[tokio::test]
    async fn test_large_quantity_is_accepted() {
        let store = MemoryStore::new();
        store.insert_many(&[priced("p1", dec!(1.25))]).await.ok();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");

        let added = service.add_item(&session, add("p1", 10_001)).await;
        assert_eq!(added.map(|item| item.qty.get()).ok(), Some(10_001));

        let cart = service.get_cart(&session).await.unwrap_or_else(|_| CartView::empty());
        assert_eq!(cart.total, dec!(12501.25));
    }

    #[tokio::test]
    async fn test_identical_adds_are_not_merged() {
        let store = MemoryStore::new();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");

        let first = service.add_item(&session, add("p1", 1)).await;
        let second = service.add_item(&session, add("p1", 1)).await;
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("adds should succeed");
        };

        assert_ne!(first.id, second.id);
        assert_eq!(service.count(&session).await.ok(), Some(2));
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input_without_writing() {
        let store = MemoryStore::new();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");

        let cases = [
            AddItem { product_id: None, qty: Some(1) },
            AddItem { product_id: Some("  ".to_string()), qty: Some(1) },
            AddItem { product_id: Some("p1".to_string()), qty: None },
            add("p1", 0),
            add("p1", -3),
        ];
        for input in cases {
            let result = service.add_item(&session, input).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }

        assert!(!store.has_cart(&session).await);
    }

    #[tokio::test]
    async fn test_remove_unknown_item_is_noop() {
        let store = MemoryStore::new();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");
        service.add_item(&session, add("p1", 1)).await.ok();

        let removed = service
            .remove_item(&session, &LineItemId::new("does-not-exist"))
            .await;
        assert!(removed.is_ok());
        assert_eq!(service.count(&session).await.ok(), Some(1));

        let no_cart = service
            .remove_item(&SessionId::new("other"), &LineItemId::new("x"))
            .await;
        assert!(no_cart.is_ok());
    }

    #[tokio::test]
    async fn test_remove_existing_item() {
        let store = MemoryStore::new();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");
        let kept = service.add_item(&session, add("p1", 1)).await.ok();
        let dropped = service.add_item(&session, add("p2", 1)).await.ok();

        if let Some(dropped) = dropped {
            service.remove_item(&session, &dropped.id).await.ok();
        }

        let cart = service.get_cart(&session).await.unwrap_or_else(|_| CartView::empty());
        let ids: Vec<_> = cart.items.iter().map(|l| l.item.id.clone()).collect();
        assert_eq!(ids, kept.map(|k| vec![k.id]).unwrap_or_default());
    }

    #[tokio::test]
    async fn test_total_rounds_and_tolerates_missing_products() {
        let store = MemoryStore::new();
        store
            .insert_many(&[priced("a", dec!(10.005)), priced("b", dec!(5.00))])
            .await
            .ok();
        let service = CartService::new(&store, &store);
        let session = SessionId::new("s1");

        service.add_item(&session, add("a", 1)).await.ok();
        service.add_item(&session, add("b", 1)).await.ok();
        service.add_item(&session, add("deleted", 7)).await.ok();

        let cart = service.get_cart(&session).await.unwrap_or_else(|_| CartView::empty());
        assert_eq!(cart.total, dec!(15.01));
        assert_eq!(cart.items.len(), 3);
        assert!(cart.items.iter().any(|l| l.product.is_none()));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = MemoryStore::new();
        store.set_failing(FailPoint::CartWrites, true).await;
        let service = CartService::new(&store, &store);

        let result = service.add_item(&SessionId::new("s1"), add("p1", 1)).await;
        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
