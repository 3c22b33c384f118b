//! WooCommerce client errors.

use thiserror::Error;

/// Errors that can occur before a WooCommerce response is received.
///
/// A response with an error status is not a `WooError`; it comes back as an
/// [`ApiResponse`](super::ApiResponse).
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize the request body.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request could not be signed.
    #[error("Authentication error: {0}")]
    Auth(String),
}
