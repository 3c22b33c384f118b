//! Request body for `POST /wc/v3/products`.

use serde::{Deserialize, Serialize};

use super::draft::{DraftError, ProductDraft, non_blank};
use super::price::Price;
use super::product_type::ProductType;

/// An image reference in a product payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL WooCommerce sideloads the image from.
    pub src: String,
}

/// JSON document sent to the product endpoint.
///
/// Optional fields that are empty are omitted from the serialized body
/// entirely rather than sent as `""` or `null`. Field order matches the
/// order WooCommerce receives them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub regular_price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub manage_stock: bool,
    pub stock_quantity: u32,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Price>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
}

impl ProductPayload {
    /// Build the payload for a draft. The draft's image is not uploaded
    /// here; see [`ProductPayload::attach_image`].
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error if required fields are missing
    /// or a price is malformed.
    pub fn from_draft(draft: &ProductDraft) -> Result<Self, DraftError> {
        let (regular_price, sale_price) = draft.checked_prices()?;

        Ok(Self {
            name: draft.name.clone(),
            product_type: draft.product_type,
            regular_price,
            description: owned_non_blank(draft.description.as_deref()),
            short_description: owned_non_blank(draft.short_description.as_deref()),
            sku: owned_non_blank(draft.sku.as_deref()),
            manage_stock: draft.manage_stock,
            stock_quantity: draft.stock_quantity,
            in_stock: draft.in_stock,
            sale_price,
            images: Vec::new(),
        })
    }

    /// Set the product image to the uploaded media URL.
    pub fn attach_image(&mut self, src: impl Into<String>) {
        self.images = vec![ImageRef { src: src.into() }];
    }
}

fn owned_non_blank(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn to_value(payload: &ProductPayload) -> Value {
        serde_json::to_value(payload).unwrap()
    }

    #[test]
    fn test_minimal_draft_body() {
        let payload = ProductPayload::from_draft(&ProductDraft::new("Blue Mug", "9.99")).unwrap();
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"name":"Blue Mug","type":"simple","regular_price":"9.99","manage_stock":true,"stock_quantity":10,"in_stock":true}"#
        );
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let mut draft = ProductDraft::new("Blue Mug", "9.99");
        draft.sku = Some(String::new());
        draft.description = Some("  ".to_string());
        draft.short_description = None;
        draft.sale_price = Some(String::new());

        let body = to_value(&ProductPayload::from_draft(&draft).unwrap());
        let object = body.as_object().unwrap();
        for key in ["sku", "description", "short_description", "sale_price", "images"] {
            assert!(!object.contains_key(key), "unexpected key {key}");
        }
    }

    #[test]
    fn test_sale_price_included_when_set() {
        let mut draft = ProductDraft::new("Blue Mug", "9.99");
        draft.sale_price = Some("7.50".to_string());

        let body = to_value(&ProductPayload::from_draft(&draft).unwrap());
        assert_eq!(body["sale_price"], json!("7.50"));
    }

    #[test]
    fn test_all_fields() {
        let mut draft = ProductDraft::new("Blue Mug", "9.99");
        draft.product_type = ProductType::Variable;
        draft.description = Some("<p>Holds coffee.</p>".to_string());
        draft.short_description = Some("A mug".to_string());
        draft.sku = Some("MUG-001".to_string());
        draft.stock_quantity = 0;
        draft.manage_stock = false;
        draft.in_stock = false;

        let body = to_value(&ProductPayload::from_draft(&draft).unwrap());
        assert_eq!(
            body,
            json!({
                "name": "Blue Mug",
                "type": "variable",
                "regular_price": "9.99",
                "description": "<p>Holds coffee.</p>",
                "short_description": "A mug",
                "sku": "MUG-001",
                "manage_stock": false,
                "stock_quantity": 0,
                "in_stock": false
            })
        );
    }

    #[test]
    fn test_name_and_sku_sent_as_typed() {
        let mut draft = ProductDraft::new("  Blue Mug ", "9.99");
        draft.sku = Some(" MUG-001 ".to_string());

        let body = to_value(&ProductPayload::from_draft(&draft).unwrap());
        assert_eq!(body["name"], json!("  Blue Mug "));
        assert_eq!(body["sku"], json!(" MUG-001 "));
    }

    #[test]
    fn test_attach_image() {
        let mut payload =
            ProductPayload::from_draft(&ProductDraft::new("Blue Mug", "9.99")).unwrap();
        payload.attach_image("https://shop.example/wp-content/uploads/mug.png");

        assert_eq!(
            to_value(&payload)["images"],
            json!([{"src": "https://shop.example/wp-content/uploads/mug.png"}])
        );
    }

    #[test]
    fn test_invalid_draft_has_no_payload() {
        assert!(ProductPayload::from_draft(&ProductDraft::new("", "9.99")).is_err());
    }
}
