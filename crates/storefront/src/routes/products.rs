//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use vibe_commerce_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::{Product, ProductQuery};
use crate::state::AppState;

/// Product listing with optional search, category filter and sort.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state
        .catalog()
        .list_products(&query)
        .await
        .map_err(|e| AppError::database("Failed to fetch products", e))?;
    Ok(Json(products))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let catalog = state.catalog();
    catalog
        .ensure_seeded()
        .await
        .map_err(|e| AppError::database("Failed to fetch product", e))?;

    catalog
        .find_product(&ProductId::new(id.as_str()))
        .await
        .map_err(|e| AppError::database("Failed to fetch product", e))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
