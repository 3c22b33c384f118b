//! Product form submission.
//!
//! One submission is: validate the draft, upload the image if there is one,
//! post the product. An image that fails to upload does not stop the
//! product from being created; the submission just carries no image.
//! Nothing is retried.

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use woo_listing_core::{DraftError, ImageFile, ProductDraft, ProductPayload};

use crate::config::AppConfig;
use crate::woocommerce::{ApiResponse, CreatedProduct, WooClient, WooError};
use crate::wordpress::{MediaClient, MediaError};

/// Reasons a submission produced no WooCommerce answer to show.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields are empty or a price is malformed. No request made.
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// The product request could not be sent or its response read.
    #[error("Create product request failed: {0}")]
    Request(#[source] WooError),

    /// WooCommerce reported success but the body is not a product object.
    #[error("Unexpected response from WooCommerce (status {status})")]
    InvalidResponse { status: u16, body: String },
}

/// What happened to the draft's image.
#[derive(Debug)]
pub enum ImageOutcome {
    /// The draft had no image.
    NotProvided,
    /// Uploaded; the payload references this URL.
    Attached(String),
    /// Upload failed; the product was created without an image.
    Skipped(MediaError),
}

/// WooCommerce's answer to the create request.
#[derive(Debug)]
pub enum CreateOutcome {
    /// Status 200/201 with the product JSON.
    Created(CreatedProduct),
    /// Any other status; shown to the user as-is.
    Rejected(ApiResponse),
}

/// Result of a submission that reached WooCommerce.
#[derive(Debug)]
pub struct Submission {
    /// The body that was posted.
    pub payload: ProductPayload,
    /// Image upload result.
    pub image: ImageOutcome,
    /// WooCommerce's answer.
    pub outcome: CreateOutcome,
}

impl Submission {
    /// Whether the product was created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self.outcome, CreateOutcome::Created(_))
    }
}

/// Creates products from form drafts.
#[derive(Debug, Clone)]
pub struct ProductService {
    woo: WooClient,
    media: MediaClient,
}

impl ProductService {
    /// Create a service from its clients.
    #[must_use]
    pub const fn new(woo: WooClient, media: MediaClient) -> Self {
        Self { woo, media }
    }

    /// Build both clients from configuration, sharing one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("woo-listing/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let woo = WooClient::new(client.clone(), &config.store_url, &config.woocommerce);
        let media = MediaClient::new(client, &config.store_url, Some(config.wordpress.clone()));

        Ok(Self::new(woo, media))
    }

    /// Submit a draft: validate, upload its image, create the product.
    ///
    /// Resubmitting the same draft creates another product.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` before any request if the draft is
    /// invalid, `SubmitError::Request` if the product request fails in
    /// transport, and `SubmitError::InvalidResponse` if a success status
    /// comes with a body that is not a JSON object. A rejected product is
    /// not an error; see [`CreateOutcome::Rejected`].
    #[instrument(skip_all, fields(name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Submission, SubmitError> {
        let mut payload = ProductPayload::from_draft(&draft).inspect_err(|e| {
            warn!(error = %e, "Product draft failed validation");
        })?;

        let image = match draft.image {
            Some(image) => self.upload_image(image, &mut payload).await,
            None => ImageOutcome::NotProvided,
        };

        debug!(
            payload = %serde_json::to_string(&payload).unwrap_or_default(),
            "Create product request payload"
        );

        let response = self.woo.create_product(&payload).await.map_err(|e| {
            error!(error = %e, "Create product request failed");
            SubmitError::Request(e)
        })?;

        let outcome = if response.is_success() {
            let product = CreatedProduct::from_response(&response).ok_or_else(|| {
                error!(status = response.status, "Create product response is not a product");
                SubmitError::InvalidResponse {
                    status: response.status,
                    body: response.body.clone(),
                }
            })?;
            info!(id = ?product.id, "Product created");
            CreateOutcome::Created(product)
        } else {
            warn!(status = response.status, "Product creation rejected");
            CreateOutcome::Rejected(response)
        };

        Ok(Submission {
            payload,
            image,
            outcome,
        })
    }

    async fn upload_image(&self, image: ImageFile, payload: &mut ProductPayload) -> ImageOutcome {
        let (filename, content) = image.into_parts();
        match self.media.upload(&filename, content).await {
            Ok(url) => {
                info!(url = %url, "Image upload succeeded");
                payload.attach_image(url.clone());
                ImageOutcome::Attached(url)
            }
            Err(e) => {
                warn!(error = %e, "Image upload failed, creating product without image");
                ImageOutcome::Skipped(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::config::WooCommerceConfig;

    const UNREACHABLE_STORE: &str = "http://127.0.0.1:9";

    fn service() -> ProductService {
        let config = WooCommerceConfig {
            consumer_key: "ck_test".to_string(),
            consumer_secret: SecretString::from("cs_test"),
            api_version: "wc/v3".to_string(),
            timeout: Duration::from_secs(5),
            query_string_auth: false,
        };
        let client = reqwest::Client::new();
        ProductService::new(
            WooClient::new(client.clone(), UNREACHABLE_STORE, &config),
            MediaClient::new(client, UNREACHABLE_STORE, None),
        )
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_any_request() {
        let err = service()
            .create_product(ProductDraft::new("", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(DraftError::MissingRequiredFields { .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        let err = service()
            .create_product(ProductDraft::new("Blue Mug", "9.99"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Request(WooError::Http(_))));
    }
}
