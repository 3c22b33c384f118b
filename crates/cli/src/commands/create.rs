//! Create a product from command-line flags.

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use woo_listing_client::services::ProductService;
use woo_listing_core::{ProductDraft, ProductType};

use super::{CommandError, load_image};
use crate::ui::{self, Ui};

/// Flags for `woo-listing create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Product name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Product type (simple, grouped, external, variable)
    #[arg(short = 't', long = "type", default_value_t = ProductType::Simple)]
    pub product_type: ProductType,

    /// Regular price, e.g. 19.99
    #[arg(short = 'p', long, default_value = "")]
    pub regular_price: String,

    /// Sale price
    #[arg(long)]
    pub sale_price: Option<String>,

    /// Long description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Short description
    #[arg(long)]
    pub short_description: Option<String>,

    /// Stock keeping unit
    #[arg(long)]
    pub sku: Option<String>,

    /// Units in stock
    #[arg(short = 'q', long, default_value_t = ProductDraft::DEFAULT_STOCK_QUANTITY)]
    pub stock_quantity: u32,

    /// Do not track stock for this product
    #[arg(long)]
    pub no_manage_stock: bool,

    /// Mark the product as out of stock
    #[arg(long)]
    pub out_of_stock: bool,

    /// JPEG or PNG image to upload and attach
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Print only the created product JSON
    #[arg(long)]
    pub json: bool,
}

impl CreateArgs {
    /// Build the draft, reading the image file if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not a JPEG or PNG or cannot be read.
    pub async fn into_draft(self) -> Result<ProductDraft, CommandError> {
        let image = match &self.image {
            Some(path) => Some(load_image(path).await?),
            None => None,
        };

        Ok(ProductDraft {
            name: self.name,
            product_type: self.product_type,
            regular_price: self.regular_price,
            sale_price: self.sale_price,
            description: self.description,
            short_description: self.short_description,
            sku: self.sku,
            stock_quantity: self.stock_quantity,
            manage_stock: !self.no_manage_stock,
            in_stock: !self.out_of_stock,
            image,
        })
    }
}

/// Submit one product and print the result.
///
/// Returns whether the product was created.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded or output cannot be
/// written. Validation, transport and rejection failures are printed and
/// reported as `Ok(false)`.
pub async fn run(service: &ProductService, args: CreateArgs) -> Result<bool, CommandError> {
    let json_only = args.json;
    let draft = args.into_draft().await?;
    info!(name = %draft.name, "Creating product from flags");

    let (message, created) = match service.create_product(draft).await {
        Ok(submission) => (
            ui::render_submission(&submission, json_only),
            submission.is_created(),
        ),
        Err(e) => (ui::render_error(&e), false),
    };

    Ui::new().print(&message)?;
    Ok(created)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CreateArgs,
    }

    fn parse(args: &[&str]) -> CreateArgs {
        TestCli::try_parse_from(std::iter::once("create").chain(args.iter().copied()))
            .unwrap()
            .args
    }

    #[tokio::test]
    async fn test_defaults_match_form() {
        let draft = parse(&["--name", "Blue Mug", "--regular-price", "9.99"])
            .into_draft()
            .await
            .unwrap();

        assert_eq!(draft.name, "Blue Mug");
        assert_eq!(draft.product_type, ProductType::Simple);
        assert_eq!(draft.regular_price, "9.99");
        assert_eq!(draft.stock_quantity, 10);
        assert!(draft.manage_stock);
        assert!(draft.in_stock);
        assert!(draft.sale_price.is_none());
        assert!(draft.image.is_none());
    }

    #[tokio::test]
    async fn test_all_flags() {
        let draft = parse(&[
            "--name",
            "Teapot",
            "--type",
            "Variable",
            "--regular-price",
            "30",
            "--sale-price",
            "25",
            "--sku",
            "TP-1",
            "--stock-quantity",
            "0",
            "--no-manage-stock",
            "--out-of-stock",
        ])
        .into_draft()
        .await
        .unwrap();

        assert_eq!(draft.product_type, ProductType::Variable);
        assert_eq!(draft.sale_price.as_deref(), Some("25"));
        assert_eq!(draft.sku.as_deref(), Some("TP-1"));
        assert_eq!(draft.stock_quantity, 0);
        assert!(!draft.manage_stock);
        assert!(!draft.in_stock);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(TestCli::try_parse_from(["create", "--type", "bundle"]).is_err());
    }

    #[tokio::test]
    async fn test_image_flag_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mug.png");
        std::fs::write(&path, b"png").unwrap();

        let draft = parse(&["--image", path.to_str().unwrap()])
            .into_draft()
            .await
            .unwrap();
        let image = draft.image.unwrap();
        assert_eq!(image.filename(), "mug.png");
        assert_eq!(image.content_type(), "image/png");
    }
}
