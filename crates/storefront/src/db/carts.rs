//! Cart document repository.
//!
//! Line items live in a JSONB array on the `carts` row. Appends use an upsert
//! that concatenates onto the existing array; removals rewrite the array
//! without the matching element in the same `UPDATE`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{debug, instrument};

use vibe_commerce_core::{LineItemId, SessionId};

use super::{CartStore, Database, RepositoryError};
use crate::models::{Cart, CartLineItem};

/// `PostgreSQL` cart store.
pub struct PgCartStore {
    db: Arc<Database>,
}

impl PgCartStore {
    /// Create a new cart store.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn find(&self, session: &SessionId) -> Result<Option<Cart>, RepositoryError> {
        let pool = self.db.pool().await?;
        let row: Option<(SessionId, Json<Vec<CartLineItem>>)> =
            sqlx::query_as("SELECT session_id, items FROM carts WHERE session_id = $1")
                .bind(session)
                .fetch_optional(pool)
                .await?;

        Ok(row.map(|(session_id, Json(items))| Cart { session_id, items }))
    }

    #[instrument(skip(self, item), fields(session = %session, item_id = %item.id))]
    async fn push_item(
        &self,
        session: &SessionId,
        item: &CartLineItem,
    ) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await?;
        sqlx::query(
            r"
            INSERT INTO carts (session_id, items, updated_at)
            VALUES ($1, jsonb_build_array($2::jsonb), now())
            ON CONFLICT (session_id) DO UPDATE
            SET items = carts.items || EXCLUDED.items,
                updated_at = now()
            ",
        )
        .bind(session)
        .bind(Json(item))
        .execute(pool)
        .await?;

        debug!("Appended cart line item");
        Ok(())
    }

    #[instrument(skip(self), fields(session = %session, item_id = %item_id))]
    async fn pull_item(
        &self,
        session: &SessionId,
        item_id: &LineItemId,
    ) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await?;
        let result = sqlx::query(
            r"
            UPDATE carts
            SET items = COALESCE(
                    (SELECT jsonb_agg(elem ORDER BY ord)
                     FROM jsonb_array_elements(carts.items) WITH ORDINALITY AS t(elem, ord)
                     WHERE elem->>'id' IS DISTINCT FROM $2),
                    '[]'::jsonb),
                updated_at = now()
            WHERE session_id = $1
            ",
        )
        .bind(session)
        .bind(item_id)
        .execute(pool)
        .await?;

        debug!(carts = result.rows_affected(), "Pulled cart line item");
        Ok(())
    }

    #[instrument(skip(self), fields(session = %session))]
    async fn delete(&self, session: &SessionId) -> Result<bool, RepositoryError> {
        let pool = self.db.pool().await?;
        let result = sqlx::query("DELETE FROM carts WHERE session_id = $1")
            .bind(session)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
