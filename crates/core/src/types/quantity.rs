//! Line-item quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    TooSmall(i64),
    /// The value does not fit in a `u32`.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// A line-item quantity, always at least 1.
///
/// ## Examples
///
/// ```
/// use vibe_commerce_core::Quantity;
///
/// assert!(Quantity::new(1).is_ok());
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Validate and wrap a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or does not fit in a `u32`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::TooSmall(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge(value))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(qty: Quantity) -> Self {
        qty.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::TooSmall(0)));
        assert_eq!(Quantity::new(-5), Err(QuantityError::TooSmall(-5)));
    }

    #[test]
    fn test_large_counts_are_valid() {
        assert_eq!(Quantity::new(10_001).map(Quantity::get), Ok(10_001));
        assert_eq!(
            Quantity::new(i64::from(u32::MAX)).map(Quantity::get),
            Ok(u32::MAX)
        );
    }

    #[test]
    fn test_rejects_values_beyond_u32() {
        let too_big = i64::from(u32::MAX) + 1;
        assert_eq!(Quantity::new(too_big), Err(QuantityError::TooLarge(too_big)));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<Quantity, _> = serde_json::from_str("2");
        assert_eq!(ok.ok().map(Quantity::get), Some(2));

        let bad: Result<Quantity, _> = serde_json::from_str("0");
        assert!(bad.is_err());
    }
}
