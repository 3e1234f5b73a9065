//! Order repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use tracing::{debug, instrument};

use vibe_commerce_core::{Email, OrderId, SessionId};

use super::{Database, OrderStore, RepositoryError};
use crate::models::{EnrichedLineItem, Order};

/// `PostgreSQL` order store.
pub struct PgOrderStore {
    db: Arc<Database>,
}

impl PgOrderStore {
    /// Create a new order store.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: OrderId,
    session_id: SessionId,
    name: String,
    email: String,
    items: Json<Vec<EnrichedLineItem>>,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
    timestamp: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in order {}: {e}", row.order_id))
        })?;
        let status = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            order_id: row.order_id,
            session_id: row.session_id,
            name: row.name,
            email,
            items: row.items.0,
            total: row.total,
            status,
            created_at: row.created_at,
            timestamp: row.timestamp,
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[instrument(skip(self, order), fields(order_id = %order.order_id, session = %order.session_id))]
    async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await?;
        sqlx::query(
            r#"
            INSERT INTO orders
                (order_id, session_id, name, email, items, total, status, created_at, "timestamp")
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&order.order_id)
        .bind(&order.session_id)
        .bind(&order.name)
        .bind(order.email.as_str())
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(&order.timestamp)
        .execute(pool)
        .await?;

        debug!("Inserted order");
        Ok(())
    }

    async fn list_for_session(&self, session: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        let pool = self.db.pool().await?;
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, session_id, name, email, items, total, status,
                   created_at, "timestamp"
            FROM orders
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(session)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
