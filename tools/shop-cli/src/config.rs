//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::cart::CART_STORAGE_KEY;
use shop_commerce::catalog::CatalogLatency;
use shop_commerce::checkout::PricingPolicy;
use shop_commerce::search::DEFAULT_PER_PAGE;
use shop_storage::validate_key;

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog behaviour.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout pricing.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Listing display.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Check values serde cannot: the cart key must be a usable storage key.
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.storage.cart_key)
            .with_context(|| format!("storage.cart_key {:?}", self.storage.cart_key))
    }

    /// Checkout pricing from the `[checkout]` section.
    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy {
            shipping_cents: self.checkout.shipping_cents,
            tax_percent: self.checkout.tax_percent,
        }
    }

    /// Simulated catalog delay from the `[catalog]` section.
    pub fn latency(&self) -> CatalogLatency {
        CatalogLatency::uniform(Duration::from_millis(self.catalog.latency_ms))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding persisted records (default: ~/.local/share/shop).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cart_key: default_cart_key(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Delay before every catalog lookup resolves, in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Flat shipping fee in cents.
    #[serde(default = "default_shipping_cents")]
    pub shipping_cents: i64,

    /// Tax as a whole percentage of the subtotal.
    #[serde(default = "default_tax_percent")]
    pub tax_percent: u32,
}

fn default_shipping_cents() -> i64 {
    PricingPolicy::default().shipping_cents
}

fn default_tax_percent() -> u32 {
    PricingPolicy::default().tax_percent
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            shipping_cents: default_shipping_cents(),
            tax_percent: default_tax_percent(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[storage]
# dir = "~/.local/share/shop"
cart_key = "{cart_key}"

[catalog]
# Simulated delay for every catalog lookup.
latency_ms = 0

[checkout]
shipping_cents = {shipping}
tax_percent = {tax}

[display]
page_size = {page_size}
"#,
        cart_key = CART_STORAGE_KEY,
        shipping = default_shipping_cents(),
        tax = default_tax_percent(),
        page_size = DEFAULT_PER_PAGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: ShopConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, ShopConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: ShopConfig = toml::from_str(
            r#"
            [checkout]
            tax_percent = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing().tax_percent, 10);
        assert_eq!(config.pricing().shipping_cents, 1000);
        assert_eq!(config.storage.cart_key, "shop_cart");
        assert_eq!(config.display.page_size, 12);
        assert_eq!(config.latency(), CatalogLatency::none());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        let mut config = ShopConfig::default();
        config.storage.dir = Some(dir.path().join("data"));
        config.catalog.latency_ms = 250;

        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = ShopConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.latency().listing, Duration::from_millis(250));
    }

    #[test]
    fn test_unusable_cart_key_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[storage]\ncart_key = \"my cart\"").unwrap();

        let err = ShopConfig::load(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("shop.toml"));
        assert!(message.contains("my cart"));

        std::fs::write(&path, "[storage]\ncart_key = \"cart_guest\"").unwrap();
        assert_eq!(ShopConfig::load(&path).unwrap().storage.cart_key, "cart_guest");
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[checkout]\ntax_percent = \"eight\"").unwrap();
        let err = ShopConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("shop.toml"));
    }
}
