//! Checkout route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentSession;
use crate::models::Order;
use crate::services::CheckoutRequest;
use crate::state::AppState;

/// Checkout response: the stored order.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub receipt: Order,
}

/// Place an order from the submitted cart and clear the session's cart.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    payload: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>> {
    let Json(request) = payload?;

    let order = state
        .checkout()
        .checkout(&session, request)
        .await
        .map_err(|e| AppError::service("Failed to create order", e))?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        &[("order_id", order.order_id.as_str())],
    );

    Ok(Json(CheckoutResponse {
        success: true,
        receipt: order,
    }))
}
