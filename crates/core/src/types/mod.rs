//! Core types for woo-listing.
//!
//! This module provides type-safe wrappers for the product form and the
//! product-creation request body.

pub mod draft;
pub mod id;
pub mod image;
pub mod payload;
pub mod price;
pub mod product_type;

pub use draft::{DraftError, ProductDraft};
pub use id::*;
pub use image::{ImageFile, SUPPORTED_IMAGE_EXTENSIONS, content_type_for, is_supported_image};
pub use payload::{ImageRef, ProductPayload};
pub use price::{Price, PriceError};
pub use product_type::{ParseProductTypeError, ProductType};
