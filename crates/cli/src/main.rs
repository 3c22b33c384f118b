//! woo-listing - Add products to a WooCommerce store.
//!
//! # Usage
//!
//! ```bash
//! # Fill in the product form interactively
//! woo-listing
//!
//! # Same, with request payloads and responses shown on the console
//! woo-listing --verbose form
//!
//! # Create a product from flags
//! woo-listing create --name "Blue Mug" --regular-price 9.99 --image mug.jpg
//! ```
//!
//! # Commands
//!
//! - `form` - Interactive product form (default)
//! - `create` - Create one product from flags

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use woo_listing_cli::commands::{self, create::CreateArgs};
use woo_listing_client::config::{AppConfig, ConfigError, LogConfig};
use woo_listing_client::logging;
use woo_listing_client::services::ProductService;

#[derive(Parser)]
#[command(name = "woo-listing")]
#[command(author, version, about = "Add products to a WooCommerce store")]
struct Cli {
    /// Show debug output, including request payloads and responses
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read environment variables from this file instead of `.env`
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the product form interactively
    Form,
    /// Create a product from command-line flags
    Create(Box<CreateArgs>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = woo_listing_cli::log_config_error(&e, &LogConfig::default(), cli.verbose);
            fail(&e)
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose) {
        fail(&e);
    }
    tracing::debug!(store_url = %config.store_url, "Configuration loaded");

    match run(cli.command, &config).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(env_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    env_file.map_or_else(AppConfig::from_env, AppConfig::from_env_file)
}

/// Report a startup error on stderr and exit.
fn fail(err: &dyn std::error::Error) -> ! {
    let _ = writeln!(std::io::stderr(), "❌ {err}");
    std::process::exit(1);
}

/// Run a command; `Ok(false)` means no product was created.
async fn run(command: Option<Commands>, config: &AppConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let service = ProductService::from_config(config)?;

    match command.unwrap_or(Commands::Form) {
        Commands::Form => {
            commands::form::run(&service).await?;
            Ok(true)
        }
        Commands::Create(args) => Ok(commands::create::run(&service, *args).await?),
    }
}
