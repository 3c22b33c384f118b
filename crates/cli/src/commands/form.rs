//! Interactive product form.
//!
//! Asks for each field in turn, submits, shows the result, and offers to
//! start another product. Answers are not kept between products, and a
//! failed submission can be re-entered from the start.

use std::path::{Path, PathBuf};

use tracing::info;
use woo_listing_client::services::ProductService;
use woo_listing_core::{ImageFile, ProductDraft, ProductType};

use super::{CommandError, check_image_path, load_image};
use crate::ui::{self, Ui};

/// Everything typed into one pass of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAnswers {
    pub name: String,
    pub product_type: ProductType,
    pub regular_price: String,
    pub sale_price: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub stock_quantity: u32,
    pub manage_stock: bool,
    pub in_stock: bool,
    pub image: Option<PathBuf>,
}

impl FormAnswers {
    /// Ask for every field.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt(ui: &Ui) -> Result<Self, CommandError> {
        let name = ui.prompt_text("Product name")?;

        let labels = ProductType::ALL.map(ProductType::as_str);
        let type_index = ui.prompt_select("Product type", &labels, 0)?;
        let product_type = ProductType::ALL
            .get(type_index)
            .copied()
            .unwrap_or_default();

        let regular_price = ui.prompt_text("Regular price")?;
        let sale_price = ui.prompt_optional("Sale price")?;
        let description = ui.prompt_optional("Description")?;
        let short_description = ui.prompt_optional("Short description")?;
        let sku = ui.prompt_optional("SKU")?;
        let stock_quantity =
            ui.prompt_number("Stock quantity", ProductDraft::DEFAULT_STOCK_QUANTITY)?;
        let manage_stock = ui.prompt_confirm("Manage stock?", true)?;
        let in_stock = ui.prompt_confirm("In stock?", true)?;
        let image = ui
            .prompt_path("Image (.jpg, .jpeg or .png, empty for none)", |input| {
                check_image_path(Path::new(input))
            })?
            .map(PathBuf::from);

        Ok(Self {
            name,
            product_type,
            regular_price,
            sale_price,
            description,
            short_description,
            sku,
            stock_quantity,
            manage_stock,
            in_stock,
            image,
        })
    }

    /// Turn the answers into a draft with an already loaded image.
    #[must_use]
    pub fn into_draft(self, image: Option<ImageFile>) -> ProductDraft {
        ProductDraft {
            name: self.name,
            product_type: self.product_type,
            regular_price: self.regular_price,
            sale_price: self.sale_price,
            description: self.description,
            short_description: self.short_description,
            sku: self.sku,
            stock_quantity: self.stock_quantity,
            manage_stock: self.manage_stock,
            in_stock: self.in_stock,
            image,
        }
    }
}

/// Run the form until the user declines to add another product.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written. Submission
/// failures are shown and the form continues.
pub async fn run(service: &ProductService) -> Result<(), CommandError> {
    let ui = Ui::new();
    ui.print_heading("🛍️ Add a new WooCommerce product")?;

    loop {
        let answers = FormAnswers::prompt(&ui)?;

        let image = match &answers.image {
            Some(path) => match load_image(path).await {
                Ok(image) => Some(image),
                Err(e) => {
                    ui.print(&format!("❌ {e}"))?;
                    None
                }
            },
            None => None,
        };

        let draft = answers.into_draft(image);
        info!(name = %draft.name, "Submitting product form");

        let message = match service.create_product(draft).await {
            Ok(submission) => ui::render_submission(&submission, false),
            Err(e) => ui::render_error(&e),
        };
        ui.print(&message)?;

        if !ui.prompt_confirm("Add another product?", false)? {
            return Ok(());
        }
    }
}
