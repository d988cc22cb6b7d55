//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};
use shop_commerce::search::{PriceBucket, SortOption};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only this category (name or slug, e.g. "Home Decor").
    #[arg(short, long)]
    pub category: Option<String>,

    /// Price range: under50, 50to100 or over100.
    #[arg(short, long)]
    pub price: Option<PriceBucket>,

    /// Sort: default, price-asc, price-desc, name-asc, name-desc, rating-desc.
    #[arg(short, long, default_value = "default")]
    pub sort: SortOption,

    /// Only products that are in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,

    /// Text to search names and descriptions for.
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Page to show (1-indexed).
    #[arg(long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a product's quantity; 0 removes it.
    Set {
        /// Product ID.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// TOML or JSON file with [shipping] and [payment] sections, instead of prompts.
    #[arg(short, long)]
    pub details: Option<String>,

    /// Place the order without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
