//! Tienda CLI - session migrations and data checks.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table
//! tienda-cli migrate
//!
//! # Validate a product catalog
//! tienda-cli catalog check crates/storefront/content/catalog.json
//!
//! # Decode a stored cart (the JSON text kept under the `cart` session key)
//! tienda-cli cart inspect cart.json --shipping-fee 8000
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tienda-cli")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session store table
    Migrate,
    /// Product catalog tools
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Stored cart tools
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load a catalog file and list its products
    Check {
        /// Path to the catalog JSON file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Decode a stored cart document and print its lines and totals
    Inspect {
        /// File holding the stored cart JSON text
        path: PathBuf,

        /// Flat shipping fee in pesos
        #[arg(long, default_value_t = tienda_storefront::config::DEFAULT_SHIPPING_FEE)]
        shipping_fee: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::sessions().await?,
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(&path)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Inspect { path, shipping_fee } => {
                commands::cart::inspect(&path, shipping_fee)?;
            }
        },
    }
    Ok(())
}
