//! Vibe Commerce Core - Shared domain types.
//!
//! This crate provides the types used by every Vibe Commerce component:
//! - `storefront` - Cart, checkout and order history HTTP service
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Validation that does not need the store (quantities, email
//! shape, rounding) lives here so every caller applies the same rules.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, quantities, money helpers, emails and order status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
