mod cart;
mod catalog;
mod render;

use clap::{Parser, Subcommand};
use tonic_core::{AppConfig, Category};
use tonic_storefront::{StorefrontClient, StorefrontError};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "tonic")]
#[command(about = "Tonic studio storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the shop catalog
    Products {
        /// Only show one department (prints, apparel, objects, digital)
        #[arg(long)]
        category: Option<Category>,
        /// Only show products added in the last 30 days
        #[arg(long)]
        new: bool,
    },
    /// Show one product with its options and variants
    Product {
        /// Product handle, e.g. sacred-geometry-i
        handle: String,
    },
    /// List collections
    Collections,
    /// Show a collection and its products
    Collection {
        /// Collection handle, e.g. editions
        handle: String,
    },
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Print the resolved configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tonic_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = storefront_client(&config)?;
    if client.is_none() {
        tracing::debug!("SHOPIFY_STOREFRONT_TOKEN not set; commerce features disabled");
    }

    match cli.command {
        Some(Commands::Products { category, new }) => {
            catalog::run_products(client.as_ref(), &config, category, new).await;
        }
        Some(Commands::Product { handle }) => {
            catalog::run_product(client.as_ref(), &handle).await;
        }
        Some(Commands::Collections) => catalog::run_collections(client.as_ref()).await,
        Some(Commands::Collection { handle }) => {
            catalog::run_collection(client.as_ref(), &config, &handle).await;
        }
        Some(Commands::Cart { command }) => cart::run_cart(client, &config, command).await?,
        Some(Commands::Config) => run_config(&config),
        None => println!("tonic: run `tonic --help` for commands"),
    }

    Ok(())
}

/// Builds the storefront client, or `None` when no access token is set.
fn storefront_client(config: &AppConfig) -> anyhow::Result<Option<StorefrontClient>> {
    match StorefrontClient::new(config) {
        Ok(client) => Ok(Some(client)),
        Err(StorefrontError::NotConfigured) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("failed to build storefront client: {e}")),
    }
}

fn run_config(config: &AppConfig) {
    println!("{config:#?}");
    println!("endpoint:   {}", config.graphql_endpoint());
    println!("configured: {}", config.is_configured());
}
