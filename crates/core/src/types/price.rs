//! Decimal money arithmetic for cart and order totals.
//!
//! All prices are plain `Decimal` amounts in the store's single currency.
//! Totals are rounded to cents with midpoint-away-from-zero rounding, so
//! `10.005 + 5.00` becomes `15.01`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Quantity;

/// Number of decimal places kept in a displayed total.
pub const CENT_PRECISION: u32 = 2;

/// Round an amount to whole cents.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded amount for one line: `unit_price × quantity`.
#[must_use]
pub fn line_amount(unit_price: Decimal, quantity: Quantity) -> Decimal {
    unit_price * Decimal::from(quantity.get())
}
