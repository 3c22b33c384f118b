//! Product operations for the WooCommerce API.

use tracing::{debug, instrument};
use woo_listing_core::ProductPayload;

use super::{ApiResponse, WooClient, WooError};

impl WooClient {
    /// Create a product.
    ///
    /// Posts the payload to `products` once. The response is returned
    /// whatever its status; callers decide how to present a rejection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent, or the
    /// response body cannot be read.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<ApiResponse, WooError> {
        let response = self.post("products", payload).await?;

        debug!(status = response.status, "Create product response status");
        debug!(body = %response.body, "Create product response body");

        Ok(response)
    }
}
