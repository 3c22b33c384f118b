//! WooCommerce REST API client.
//!
//! Provides access to the `wc/v3` REST API for creating products.
//!
//! # API Reference
//!
//! - Base URL: `<store>/wp-json/<version>/` (version defaults to `wc/v3`)
//! - Authentication: consumer key/secret, see [`auth`]
//! - Non-2xx responses are returned as [`ApiResponse`] values, not errors

pub mod auth;
mod client;
mod error;
mod products;
mod types;

pub use client::WooClient;
pub use error::WooError;
pub use types::{ApiResponse, CreatedProduct};
