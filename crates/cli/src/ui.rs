//! Terminal input and output.
//!
//! Prompts go through dialoguer. Messages are built by the `render_*`
//! functions as plain strings and written to stdout by [`Ui::print`].

use std::io::{self, Write};

use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use woo_listing_client::services::{CreateOutcome, SubmitError, Submission};
use woo_listing_core::DraftError;

/// Interactive terminal.
pub struct Ui {
    theme: ColorfulTheme,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme {
                prompt_prefix: style("›".to_string()).cyan().bold(),
                prompt_suffix: style("›".to_string()).dim().bold(),
                success_prefix: style("›".to_string()).dim().bold(),
                ..ColorfulTheme::default()
            },
        }
    }

    /// Write a message and a newline to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is closed.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{msg}")
    }

    /// Print a bold heading.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is closed.
    pub fn print_heading(&self, msg: &str) -> io::Result<()> {
        self.print(&style(msg).bold().to_string())
    }

    /// Prompt for text; an empty answer is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_text(&self, msg: &str) -> dialoguer::Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(msg)
            .allow_empty(true)
            .interact_text()
    }

    /// Prompt for text; an empty answer becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_optional(&self, msg: &str) -> dialoguer::Result<Option<String>> {
        let answer = self.prompt_text(msg)?;
        Ok(Some(answer).filter(|a| !a.trim().is_empty()))
    }

    /// Prompt for a whole number.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_number(&self, msg: &str, default: u32) -> dialoguer::Result<u32> {
        Input::<u32>::with_theme(&self.theme)
            .with_prompt(msg)
            .default(default)
            .interact_text()
    }

    /// Prompt for a path that is empty or passes `validate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_path<V>(&self, msg: &str, mut validate: V) -> dialoguer::Result<Option<String>>
    where
        V: FnMut(&str) -> Result<(), String>,
    {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(msg)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() {
                    Ok(())
                } else {
                    validate(input.trim())
                }
            })
            .interact_text()?;
        Ok(Some(answer.trim().to_string()).filter(|a| !a.is_empty()))
    }

    /// Prompt for one of `items`, returning its index.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_select(&self, msg: &str, items: &[&str], default: usize) -> dialoguer::Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(msg)
            .items(items)
            .default(default)
            .interact()
    }

    /// Prompt for yes or no.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    pub fn prompt_confirm(&self, msg: &str, default: bool) -> dialoguer::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(msg)
            .default(default)
            .report(true)
            .interact()
    }
}

/// Message for a submission WooCommerce answered.
///
/// A created product shows its ID and the returned JSON; with `json_only`
/// the JSON is all that is printed. A rejection shows the status and the
/// response body exactly as received.
#[must_use]
pub fn render_submission(submission: &Submission, json_only: bool) -> String {
    match &submission.outcome {
        CreateOutcome::Created(product) => {
            let json = serde_json::to_string_pretty(&product.body).unwrap_or_default();
            if json_only {
                return json;
            }
            let id = product
                .id
                .map_or_else(|| "unknown".to_string(), |id| id.to_string());
            format!("✅ Product created! ID: {id}\n{json}")
        }
        CreateOutcome::Rejected(response) => rejection(response.status, &response.body),
    }
}

/// Message for a submission that got no usable answer.
#[must_use]
pub fn render_error(err: &SubmitError) -> String {
    match err {
        SubmitError::Validation(DraftError::MissingRequiredFields { .. }) => {
            "❌ Product name and regular price are required".to_string()
        }
        SubmitError::Validation(e) => format!("❌ Cannot create product: {e}"),
        SubmitError::Request(_) => "❌ Creation failed: request exception".to_string(),
        SubmitError::InvalidResponse { status, body } => rejection(*status, body),
    }
}

fn rejection(status: u16, body: &str) -> String {
    format!("❌ Failed to create product: {status}\n{body}")
}
