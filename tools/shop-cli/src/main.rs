//! Shop CLI - a terminal storefront.
//!
//! Commands:
//! - `shop products` - List products with filters, sorting and paging
//! - `shop product` - Show one product
//! - `shop featured` - List featured products
//! - `shop categories` / `shop category` - Browse by category
//! - `shop search` - Search product names and descriptions
//! - `shop cart` - Show and change the persisted cart
//! - `shop checkout` - Check out the cart
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ProductsArgs};

/// Shop CLI - browse the catalog, fill a cart, check out
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a product
    Product {
        /// Product ID
        id: String,
    },

    /// List featured products
    Featured,

    /// List categories
    Categories,

    /// Show a category and its products
    Category {
        /// Category ID
        id: String,
    },

    /// Search products by name or description
    Search {
        /// Text to search for
        text: String,
    },

    /// Show or change the cart
    Cart(CartArgs),

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,shop={level},shop_commerce={level},shop_storage={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Product { id } => commands::catalog::product(&id, &ctx).await,
        Commands::Featured => commands::catalog::featured(&ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Category { id } => commands::catalog::category(&id, &ctx).await,
        Commands::Search { text } => commands::catalog::search(&text, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
