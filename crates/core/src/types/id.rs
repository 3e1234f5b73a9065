//! Newtype IDs for type-safe entity references.
//!
//! Every identifier in the store is an opaque string (product ids come from
//! the seed catalog, line-item ids are UUIDs, order ids are time-derived).
//! Use the `define_id!` macro to create wrappers that prevent accidentally
//! passing a product id where a line-item id is expected.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
/// - `sqlx` `Type` (transparent over `TEXT`) with the `postgres` feature
///
/// # Example
///
/// ```rust
/// # use vibe_commerce_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget = WidgetId::new("w-1");
/// let gadget = GadgetId::new("w-1");
///
/// assert_eq!(widget.as_str(), gadget.as_str());
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(LineItemId);
define_id!(OrderId);
define_id!(SessionId);

/// Prefix carried by every order id.
pub const ORDER_ID_PREFIX: &str = "ORD-";

impl LineItemId {
    /// Generate a fresh line-item id (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl OrderId {
    /// Derive an order id from the checkout instant.
    ///
    /// Uniqueness is best-effort: two checkouts within the same millisecond
    /// produce the same id.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{ORDER_ID_PREFIX}{}", at.timestamp_millis()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_order_id_is_prefixed_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).single();
        let id = OrderId::from_timestamp(at.unwrap_or_default());
        assert_eq!(id.as_str(), "ORD-1700000000123");
    }

    #[test]
    fn test_line_item_ids_are_unique() {
        assert_ne!(LineItemId::generate(), LineItemId::generate());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = ProductId::new("3");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"3\""));
    }
}
