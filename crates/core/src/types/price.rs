//! Product prices as entered on the form.
//!
//! WooCommerce takes prices as decimal strings (`"19.99"`), so a [`Price`]
//! keeps the text the user typed and only uses [`Decimal`] to check that the
//! text is a non-negative number.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number, e.g. 19.99 (got {0:?})")]
    NotANumber(String),
    /// The input is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(String),
}

/// A non-negative decimal price, serialized as the text it was parsed from.
///
/// ## Examples
///
/// ```
/// use woo_listing_core::Price;
///
/// let price = Price::parse(" 9.99 ").unwrap();
/// assert_eq!(price.as_str(), "9.99");
///
/// assert!(Price::parse("").is_err());
/// assert!(Price::parse("cheap").is_err());
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1_000").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    text: String,
    amount: Decimal,
}

impl Price {
    /// Parse a `Price`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a decimal number, or
    /// is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let text = s.trim();
        if text.is_empty() {
            return Err(PriceError::Empty);
        }

        // `Decimal::from_str` also takes `_` digit separators
        if !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        {
            return Err(PriceError::NotANumber(text.to_owned()));
        }

        let amount =
            Decimal::from_str(text).map_err(|_| PriceError::NotANumber(text.to_owned()))?;
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(text.to_owned()));
        }

        Ok(Self {
            text: text.to_owned(),
            amount,
        })
    }

    /// The price exactly as it will be sent.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The numeric value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.text
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text() {
        let price = Price::parse("19.90").unwrap();
        assert_eq!(price.as_str(), "19.90");
        assert_eq!(price.amount(), Decimal::new(1990, 2));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(Price::parse("10").unwrap().as_str(), "10");
    }

    #[test]
    fn test_parse_zero() {
        assert!(Price::parse("0").is_ok());
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(
            Price::parse("9,99"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_rejects_separators_and_exponents() {
        for input in ["1_000", "1_0.00", "1e3", "0x10", "9.99 USD"] {
            assert_eq!(
                Price::parse(input),
                Err(PriceError::NotANumber(input.to_owned())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(
            Price::parse("-0.01"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let price = Price::parse("9.99").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"9.99\"");
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
        let price: Price = serde_json::from_str("\"4.50\"").unwrap();
        assert_eq!(price.as_str(), "4.50");
    }
}
