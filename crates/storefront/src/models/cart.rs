//! Cart documents and the enriched read model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vibe_commerce_core::{LineItemId, ProductId, Quantity, SessionId, line_amount, round_to_cents};

use super::Product;

/// One entry in a session's cart.
///
/// The product is referenced by id only and resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(alias = "_id")]
    pub id: LineItemId,
    pub product_id: ProductId,
    pub qty: Quantity,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Create a line item with a fresh id, stamped now.
    #[must_use]
    pub fn new(product_id: ProductId, qty: Quantity) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id,
            qty,
            added_at: Utc::now(),
        }
    }
}

/// A session's cart document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub session_id: SessionId,
    pub items: Vec<CartLineItem>,
}

/// A line item joined with its current catalog record.
///
/// `product` is `None` when the referenced product no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLineItem {
    #[serde(flatten)]
    pub item: CartLineItem,
    #[serde(default)]
    pub product: Option<Product>,
}

impl EnrichedLineItem {
    /// Unrounded `price × qty`, zero for a missing product.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.product
            .as_ref()
            .map_or(Decimal::ZERO, |p| line_amount(p.price, self.item.qty))
    }
}

/// Sum of line amounts rounded to cents.
#[must_use]
pub fn cart_total(items: &[EnrichedLineItem]) -> Decimal {
    round_to_cents(items.iter().map(EnrichedLineItem::amount).sum())
}

/// Response body of `GET /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<EnrichedLineItem>,
    pub total: Decimal,
}

impl CartView {
    /// The view of a missing or empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Build a view, computing the total from the items.
    #[must_use]
    pub fn new(items: Vec<EnrichedLineItem>) -> Self {
        let total = cart_total(&items);
        Self { items, total }
    }
}
