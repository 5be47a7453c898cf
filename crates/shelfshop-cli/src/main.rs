mod cart;
mod products;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shelfshop-cli")]
#[command(about = "Shelfshop storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List featured products from the storefront catalog
    Products {
        /// Number of products to request (defaults to SHELFSHOP_FEATURED_COUNT)
        #[arg(long)]
        first: Option<u32>,
        /// Only show products of this type
        #[arg(long = "type")]
        product_type: Option<String>,
        /// Case-insensitive search over titles and tags
        #[arg(long, short)]
        query: Option<String>,
        /// Print normalized products as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the cart badge counter
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
}

#[derive(Debug, Subcommand)]
enum CartCommands {
    /// Print the current count
    Show,
    /// Add one item
    Add,
    /// Remove one item (never below zero)
    Remove,
    /// Set the count back to zero
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = shelfshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Products {
            first,
            product_type,
            query,
            json,
        } => {
            let options = products::ListOptions {
                first: first.unwrap_or(config.featured_count),
                product_type,
                query: query.unwrap_or_default(),
                json,
            };
            products::run_list_products(&config, &options).await?;
        }
        Commands::Cart { command } => cart::run_cart(&config, &command),
    }

    Ok(())
}
