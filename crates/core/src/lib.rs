//! woo-listing core - Shared product types.
//!
//! This crate provides the types shared by the woo-listing components:
//! - `client` - WooCommerce and WordPress HTTP clients plus the submit service
//! - `cli` - Interactive product form and `create` command
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. A [`ProductDraft`] is what the user typed; a [`ProductPayload`]
//! is the JSON document sent to `POST /wp-json/wc/v3/products`.
//!
//! # Modules
//!
//! - [`types`] - Product type, price, draft, image and payload types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
