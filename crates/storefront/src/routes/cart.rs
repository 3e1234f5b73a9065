//! Cart route handlers.
//!
//! The cart is keyed by the `sessionId` cookie; see [`CurrentSession`].

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use vibe_commerce_core::LineItemId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentSession;
use crate::models::CartView;
use crate::services::ValidationError;
use crate::services::cart::AddItem;
use crate::state::AppState;

/// Add-to-cart request body.
///
/// `qty` is kept as raw JSON so that a non-integer quantity is reported as a
/// validation error rather than a body parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub qty: Option<Value>,
}

impl TryFrom<AddToCartBody> for AddItem {
    type Error = ValidationError;

    fn try_from(body: AddToCartBody) -> std::result::Result<Self, Self::Error> {
        let qty = match body.qty {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                ValidationError::InvalidQuantity("qty must be a whole number".to_string())
            })?),
        };
        Ok(Self {
            product_id: body.product_id,
            qty,
        })
    }
}

/// Mutation acknowledgement.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Line item count for the header badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: usize,
}

/// Show the session's cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<CartView>> {
    let cart = state
        .cart()
        .get_cart(&session)
        .await
        .map_err(|e| AppError::database("Failed to fetch cart", e))?;
    Ok(Json(cart))
}

/// Get the number of line items in the session's cart.
#[instrument(skip(state))]
pub async fn count(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<CartCount>> {
    let count = state
        .cart()
        .count(&session)
        .await
        .map_err(|e| AppError::database("Failed to fetch cart", e))?;
    Ok(Json(CartCount { count }))
}

/// Add a product to the session's cart.
#[instrument(skip(state, payload))]
pub async fn add(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    payload: std::result::Result<Json<AddToCartBody>, JsonRejection>,
) -> Result<Json<Ack>> {
    let Json(body) = payload?;
    let input = AddItem::try_from(body)?;

    let item = state
        .cart()
        .add_item(&session, input)
        .await
        .map_err(|e| AppError::service("Failed to add to cart", e))?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", item.product_id.as_str())],
    );

    Ok(Json(Ack {
        success: true,
        message: Some("Item added to cart"),
    }))
}

/// Remove a line item from the session's cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(item_id): Path<String>,
) -> Result<Json<Ack>> {
    state
        .cart()
        .remove_item(&session, &LineItemId::new(item_id))
        .await
        .map_err(|e| AppError::database("Failed to remove from cart", e))?;

    Ok(Json(Ack {
        success: true,
        message: None,
    }))
}
