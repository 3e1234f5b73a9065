//! Order records.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vibe_commerce_core::{Email, OrderId, OrderStatus, SessionId};

use super::EnrichedLineItem;

/// An immutable order written at checkout.
///
/// `items` is a frozen copy of the line items submitted with the checkout,
/// so later catalog changes do not alter the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub session_id: SessionId,
    pub name: String,
    pub email: Email,
    pub items: Vec<EnrichedLineItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// RFC 3339 rendering of `created_at` (millisecond precision).
    pub timestamp: String,
}

impl Order {
    /// Build a completed order placed at `at`.
    #[must_use]
    pub fn completed(
        session_id: SessionId,
        name: String,
        email: Email,
        items: Vec<EnrichedLineItem>,
        total: Decimal,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: OrderId::from_timestamp(at),
            session_id,
            name,
            email,
            items,
            total,
            status: OrderStatus::Completed,
            created_at: at,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_completed_order_fields() {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 30, 0)
            .single()
            .unwrap_or_default();
        let email = Email::parse("ada@example.com");
        assert!(email.is_ok());
        let Ok(email) = email else { return };

        let order = Order::completed(
            SessionId::new("s1"),
            "Ada".to_string(),
            email,
            Vec::new(),
            dec!(42.50),
            at,
        );

        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.order_id.as_str(), format!("ORD-{}", at.timestamp_millis()));
        assert_eq!(order.timestamp, "2026-03-01T12:30:00.000Z");

        let json = serde_json::to_value(&order).unwrap_or_default();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["orderId"], order.order_id.as_str());
        assert_eq!(json["sessionId"], "s1");
    }
}
