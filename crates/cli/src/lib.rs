//! Command-line product form for WooCommerce stores.
//!
//! The `woo-listing` binary either walks through the form interactively
//! or creates a product straight from flags. Both end up in
//! [`ProductService::create_product`](woo_listing_client::services::ProductService::create_product).

#![cfg_attr(not(test), forbid(unsafe_code))]

use woo_listing_client::config::{ConfigError, LogConfig};
use woo_listing_client::logging::{self, LoggingError};

pub mod commands;
pub mod ui;

/// Record a configuration error in the log file named by `log`.
///
/// Used when the configuration could not be loaded, with
/// `LogConfig::default()` standing in for the configured log settings.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized.
pub fn log_config_error(
    err: &ConfigError,
    log: &LogConfig,
    verbose: bool,
) -> Result<(), LoggingError> {
    logging::init(log, verbose)?;
    tracing::error!("Missing or invalid configuration: {err}");
    Ok(())
}
