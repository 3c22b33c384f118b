//! WordPress media upload client.

use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, instrument};
use woo_listing_core::content_type_for;

use super::error::MediaError;
use super::types::MediaResponse;
use crate::config::WordPressConfig;

/// Media library path relative to the store URL.
const MEDIA_PATH: &str = "wp-json/wp/v2/media";

/// Client for `POST /wp-json/wp/v2/media`.
#[derive(Clone)]
pub struct MediaClient {
    /// HTTP client.
    client: Client,
    /// Full media endpoint URL.
    endpoint: String,
    /// Basic-auth credentials; uploads fail fast without them.
    credentials: Option<WordPressConfig>,
}

impl std::fmt::Debug for MediaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl MediaClient {
    /// Create a media client for a store.
    ///
    /// `store_url` must not end with a slash.
    #[must_use]
    pub fn new(client: Client, store_url: &str, credentials: Option<WordPressConfig>) -> Self {
        Self {
            client,
            endpoint: format!("{store_url}/{MEDIA_PATH}"),
            credentials,
        }
    }

    /// The media endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload an image and return its public URL.
    ///
    /// Sends the raw bytes with `Content-Disposition: attachment;
    /// filename=<filename>` and a `Content-Type` guessed from the file
    /// suffix. No timeout is applied.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::MissingCredentials` or `MediaError::EmptyUpload`
    /// without making a request, `MediaError::Request` on transport failure,
    /// `MediaError::Status` for any status other than 200/201, and
    /// `MediaError::MissingSourceUrl` if the response has no URL.
    #[instrument(skip(self, content), fields(filename = %filename, bytes = content.len()))]
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> Result<String, MediaError> {
        if filename.trim().is_empty() || content.is_empty() {
            return Err(MediaError::EmptyUpload);
        }

        let Some(credentials) = &self.credentials else {
            error!("WordPress credentials not set, cannot upload image");
            return Err(MediaError::MissingCredentials);
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(
                &credentials.username,
                Some(credentials.application_password.expose_secret()),
            )
            .header(CONTENT_DISPOSITION, format!("attachment; filename={filename}"))
            .header(CONTENT_TYPE, content_type_for(filename))
            .body(content)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Image upload request failed");
                MediaError::Request(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read image upload response");
            MediaError::Request(e)
        })?;

        debug!(status, "Image upload response status");
        debug!(body = %body, "Image upload response body");

        if !matches!(status, 200 | 201) {
            error!(status, "Image upload failed");
            return Err(MediaError::Status { status, body });
        }

        let media: MediaResponse =
            serde_json::from_str(&body).map_err(|e| MediaError::Response(e.to_string()))?;

        let url = media.source_url.ok_or(MediaError::MissingSourceUrl)?;
        info!(media_id = ?media.id, url = %url, "Image uploaded");

        Ok(url)
    }
}
