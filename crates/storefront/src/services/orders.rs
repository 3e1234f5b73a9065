//! Session order history.

use tracing::instrument;

use vibe_commerce_core::SessionId;

use crate::db::{OrderStore, RepositoryError};
use crate::models::Order;

/// Read-only access to a session's past orders.
pub struct OrderHistory<'a> {
    orders: &'a dyn OrderStore,
}

impl<'a> OrderHistory<'a> {
    /// Create a new order history accessor.
    #[must_use]
    pub const fn new(orders: &'a dyn OrderStore) -> Self {
        Self { orders }
    }

    /// All orders for `session`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn list_orders(&self, session: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        self.orders.list_for_session(session).await
    }
}
