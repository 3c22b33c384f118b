//! WooCommerce response types.

use serde_json::Value;
use woo_listing_core::ProductId;

/// A raw WooCommerce response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unparsed.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is one WooCommerce uses for a successful create.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// A product WooCommerce reported as created.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedProduct {
    /// The new product's ID, if the response carried one.
    pub id: Option<ProductId>,
    /// The full product JSON.
    pub body: Value,
}

impl CreatedProduct {
    /// Read a created product from a response body.
    ///
    /// Returns `None` unless the body is a JSON object.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Option<Self> {
        let body = response.json().ok().filter(Value::is_object)?;
        let id = body.get("id").and_then(Value::as_u64).map(ProductId::new);
        Some(Self { id, body })
    }
}
