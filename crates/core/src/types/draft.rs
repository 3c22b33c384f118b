//! Product drafts: the raw contents of the product form.

use super::image::ImageFile;
use super::price::{Price, PriceError};
use super::product_type::ProductType;

/// Errors that stop a draft from being submitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Name and/or regular price were left empty.
    #[error("product name and regular price are required")]
    MissingRequiredFields {
        /// Wire names of the empty fields.
        missing: Vec<&'static str>,
    },
    /// The regular price is not a valid price.
    #[error("invalid regular price: {0}")]
    InvalidRegularPrice(PriceError),
    /// The sale price is set but not a valid price.
    #[error("invalid sale price: {0}")]
    InvalidSalePrice(PriceError),
}

/// Everything the user entered on the product form.
///
/// Exists only while one submission is handled. Optional text fields that
/// are `None`, empty or whitespace-only are treated the same way: they are
/// left out of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name (required).
    pub name: String,
    /// Product type.
    pub product_type: ProductType,
    /// Regular price as typed (required).
    pub regular_price: String,
    /// Sale price as typed.
    pub sale_price: Option<String>,
    /// Long description (HTML allowed).
    pub description: Option<String>,
    /// Short description (HTML allowed).
    pub short_description: Option<String>,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Units in stock.
    pub stock_quantity: u32,
    /// Whether WooCommerce tracks stock for this product.
    pub manage_stock: bool,
    /// Whether the product is in stock.
    pub in_stock: bool,
    /// Optional product image, uploaded before the product is created.
    pub image: Option<ImageFile>,
}

impl ProductDraft {
    /// Stock quantity the form starts with.
    pub const DEFAULT_STOCK_QUANTITY: u32 = 10;

    /// Create a draft with the form defaults: simple product, 10 in stock,
    /// stock managed, in stock, no optional fields.
    #[must_use]
    pub fn new(name: impl Into<String>, regular_price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product_type: ProductType::default(),
            regular_price: regular_price.into(),
            sale_price: None,
            description: None,
            short_description: None,
            sku: None,
            stock_quantity: Self::DEFAULT_STOCK_QUANTITY,
            manage_stock: true,
            in_stock: true,
            image: None,
        }
    }

    /// Check the required fields and the price formats.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::MissingRequiredFields` if the name or the regular
    /// price is empty, or an invalid-price error if a price does not parse.
    pub fn validate(&self) -> Result<(), DraftError> {
        self.checked_prices().map(|_| ())
    }

    /// Validate the draft and return its parsed prices.
    pub(crate) fn checked_prices(&self) -> Result<(Price, Option<Price>), DraftError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.regular_price.trim().is_empty() {
            missing.push("regular_price");
        }
        if !missing.is_empty() {
            return Err(DraftError::MissingRequiredFields { missing });
        }

        let regular = Price::parse(&self.regular_price).map_err(DraftError::InvalidRegularPrice)?;
        let sale = non_blank(self.sale_price.as_deref())
            .map(Price::parse)
            .transpose()
            .map_err(DraftError::InvalidSalePrice)?;

        Ok((regular, sale))
    }
}

/// Returns the text if it holds anything other than whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
