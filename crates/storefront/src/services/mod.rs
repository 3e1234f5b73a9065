//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing, lookup and one-time seeding
//! - `cart` - Session cart reads, appends and removals
//! - `checkout` - Cart-to-order conversion
//! - `orders` - Session order history
//!
//! Services borrow the stores they need for the duration of one request and
//! hold no state of their own.

pub mod cart;
pub mod catalog;
pub mod checkout;
mod error;
pub mod orders;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::{CheckoutRequest, CheckoutService};
pub use error::{ServiceError, ValidationError};
pub use orders::OrderHistory;
