//! Media upload errors.

use thiserror::Error;

/// Errors that can occur when uploading to the WordPress media library.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Username or application password not configured.
    #[error("WordPress username or application password not set, cannot upload image")]
    MissingCredentials,

    /// Filename or content is empty.
    #[error("Image upload needs a filename and content")]
    EmptyUpload,

    /// HTTP request failed.
    #[error("Image upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// WordPress answered with a status other than 200/201.
    #[error("Image upload failed with status {status}")]
    Status { status: u16, body: String },

    /// Failed to parse response.
    #[error("Image upload response error: {0}")]
    Response(String),

    /// Upload accepted but the response had no `source_url`.
    #[error("Image upload response has no source_url")]
    MissingSourceUrl,
}
