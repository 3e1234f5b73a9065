//! Domain models for the storefront.
//!
//! These are the documents persisted by the store layer and returned as JSON
//! by the HTTP routes. Field names serialize in camelCase.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLineItem, CartView, EnrichedLineItem};
pub use order::Order;
pub use product::{Product, ProductQuery, ProductSort};
