//! Vibe Commerce storefront library.
//!
//! Session carts, checkout and order history over a JSON HTTP API. The
//! binary in `main.rs` wires configuration, telemetry and the server around
//! [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
