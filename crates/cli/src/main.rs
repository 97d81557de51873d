//! Luxe CLI - catalog commands and the interactive shop session.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! luxe products list
//! luxe products list --category "men's clothing"
//! luxe products show 1
//!
//! # Write against the mock API (accepted but not persisted upstream)
//! luxe products create --title "Silk Scarf" --price 79.99 \
//!     --description "Hand-rolled hem" --image https://example.com/scarf.jpg \
//!     --category accessories
//! luxe products delete 1
//!
//! # Interactive session: cart, wishlist, login, checkout
//! luxe shop
//! ```
//!
//! Configuration comes from the environment (`LUXE_API_BASE_URL`,
//! `LUXE_DATA_DIR`, `LUXE_LOGIN_DELAY_MS`, `LUXE_CHECKOUT_DELAY_MS`), all
//! optional.

#![cfg_attr(not(test), forbid(unsafe_code))]
// This is the presentation layer; printing is its job.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use luxe_storefront::{AppState, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "luxe")]
#[command(author, version, about = "Luxe storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and edit the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Start an interactive shopping session
    Shop,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered to one category
    List {
        /// Category name, e.g. "electronics"
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: i32,
    },
    /// Create a product (the mock API will not persist it)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Replace a product record
    Update {
        /// Product id
        id: i32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; defaults to warnings so the shell stays quiet
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> luxe_storefront::Result<()> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(&state, category.as_deref()).await?;
            }
            ProductsAction::Show { id } => commands::products::show(&state, id).await?,
            ProductsAction::Create {
                title,
                price,
                description,
                image,
                category,
            } => {
                commands::products::create(&state, title, price, description, image, category)
                    .await?;
            }
            ProductsAction::Update {
                id,
                title,
                price,
                description,
                image,
                category,
            } => {
                commands::products::update(&state, id, title, price, description, image, category)
                    .await?;
            }
            ProductsAction::Delete { id } => commands::products::delete(&state, id).await?,
        },
        Commands::Shop => commands::shop::run(&state).await?,
    }
    Ok(())
}
