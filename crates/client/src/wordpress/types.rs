//! WordPress REST API types.

use serde::Deserialize;
use woo_listing_core::MediaId;

/// The fields of a `wp/v2/media` response that the uploader reads.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaResponse {
    /// Attachment ID.
    #[serde(default)]
    pub id: Option<MediaId>,
    /// Public URL of the uploaded file.
    #[serde(default)]
    pub source_url: Option<String>,
}
