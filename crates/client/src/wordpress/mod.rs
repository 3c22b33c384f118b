//! WordPress media library integration.
//!
//! Product images are uploaded to `POST /wp-json/wp/v2/media` with basic
//! authentication (WordPress username + application password). The returned
//! `source_url` is what the product payload references.

mod client;
mod error;
mod types;

pub use client::MediaClient;
pub use error::MediaError;
pub use types::MediaResponse;
