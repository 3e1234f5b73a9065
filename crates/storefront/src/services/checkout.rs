//! Cart-to-order conversion.
//!
//! Checkout writes the order first and deletes the cart second, as two
//! independent store calls:
//!
//! - order insert fails: the cart is untouched and the checkout fails
//! - cart delete fails: the order stands, the stale cart is logged and the
//!   checkout still succeeds
//!
//! The order stores the line items and total exactly as submitted. The server
//! reprices the items against the current catalog only to log a mismatch.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use vibe_commerce_core::{Email, SessionId};

use super::cart::enrich;
use super::{ServiceError, ValidationError};
use crate::db::{CartStore, OrderStore, ProductStore};
use crate::models::{EnrichedLineItem, Order, cart::cart_total};

/// Checkout form as submitted by the client.
///
/// Validation is stricter than presence checks alone: `email` must have the
/// `local@domain` shape and `total` must be positive, so a negative total or
/// an address like `not-an-email` is rejected with 400.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cart_items: Option<Vec<EnrichedLineItem>>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// A checkout request that passed validation.
#[derive(Debug)]
struct ValidCheckout {
    name: String,
    email: Email,
    items: Vec<EnrichedLineItem>,
    total: Decimal,
}

impl CheckoutRequest {
    fn validate(self) -> Result<ValidCheckout, ValidationError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingField("name"))?;
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(ValidationError::MissingField("email"))?;
        let email = Email::parse(&email)?;
        let items = self
            .cart_items
            .filter(|items| !items.is_empty())
            .ok_or(ValidationError::MissingField("cartItems"))?;
        let total = self
            .total
            .filter(|t| *t > Decimal::ZERO)
            .ok_or(ValidationError::MissingField("total"))?;

        Ok(ValidCheckout {
            name,
            email,
            items,
            total,
        })
    }
}

/// Converts a session's cart into an order.
pub struct CheckoutService<'a> {
    carts: &'a dyn CartStore,
    orders: &'a dyn OrderStore,
    products: &'a dyn ProductStore,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(
        carts: &'a dyn CartStore,
        orders: &'a dyn OrderStore,
        products: &'a dyn ProductStore,
    ) -> Self {
        Self {
            carts,
            orders,
            products,
        }
    }

    /// Place an order for `session` and clear its cart.
    ///
    /// Retrying a checkout creates another order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if a field is missing or invalid (no
    /// writes happen) and `ServiceError::Repository` if the order insert fails.
    #[instrument(skip(self, request), fields(session = %session))]
    pub async fn checkout(
        &self,
        session: &SessionId,
        request: CheckoutRequest,
    ) -> Result<Order, ServiceError> {
        let checkout = request.validate()?;
        self.check_total(&checkout.items, checkout.total).await;

        let order = Order::completed(
            session.clone(),
            checkout.name,
            checkout.email,
            checkout.items,
            checkout.total,
            Utc::now(),
        );

        self.orders.insert(&order).await?;
        info!(order_id = %order.order_id, total = %order.total, "Order created");

        if let Err(e) = self.carts.delete(session).await {
            warn!(
                order_id = %order.order_id,
                error = %e,
                "Order created but cart could not be cleared"
            );
        }

        Ok(order)
    }

    async fn check_total(&self, items: &[EnrichedLineItem], submitted: Decimal) {
        let line_items = items.iter().map(|line| line.item.clone()).collect();
        let expected = match enrich(self.products, line_items).await {
            Ok(repriced) => cart_total(&repriced),
            Err(e) => {
                debug!(error = %e, "Skipping total check");
                return;
            }
        };

        if expected != submitted {
            warn!(%submitted, %expected, "Checkout total differs from catalog prices");
        }
    }
}
