//! woo-listing client library.
//!
//! Talks to a WooCommerce store on behalf of the product form:
//!
//! - [`config`] - Credentials and settings from the environment
//! - [`wordpress`] - Image upload to the WordPress media library
//! - [`woocommerce`] - Product creation through the WooCommerce REST API
//! - [`services`] - One form submission: validate, upload, create
//! - [`logging`] - Console and rotating file log output
//!
//! # Security
//!
//! The consumer secret and application password are held as
//! [`secrecy::SecretString`] and redacted from `Debug` output.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod logging;
pub mod services;
pub mod woocommerce;
pub mod wordpress;
