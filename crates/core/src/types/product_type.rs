//! WooCommerce product types.

use serde::{Deserialize, Serialize};

/// Error returned when text does not name a known product type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid product type: {0} (expected simple, grouped, external or variable)")]
pub struct ParseProductTypeError(String);

/// Product type accepted by `POST /wc/v3/products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// A single purchasable item.
    #[default]
    Simple,
    /// A collection of related products.
    Grouped,
    /// A product sold on another site (affiliate link).
    External,
    /// A product with variations such as size or color.
    Variable,
}

impl ProductType {
    /// All product types in form order.
    pub const ALL: [Self; 4] = [Self::Simple, Self::Grouped, Self::External, Self::Variable];

    /// The wire name of this product type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Grouped => "grouped",
            Self::External => "external",
            Self::Variable => "variable",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = ParseProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseProductTypeError(s.to_owned()))
    }
}
