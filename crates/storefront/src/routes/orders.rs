//! Order history route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::CurrentSession;
use crate::models::Order;
use crate::state::AppState;

/// Order history response.
#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
}

/// List the session's orders, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<OrderList>> {
    let orders = state
        .orders()
        .list_orders(&session)
        .await
        .map_err(|e| AppError::database("Failed to fetch orders", e))?;
    Ok(Json(OrderList { orders }))
}
