//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shop_commerce::cart::{load_cart, CartState, CartStore};
use shop_commerce::catalog::InMemoryCatalog;
use shop_storage::FileStorage;

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            (ShopConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => (ShopConfig::load(&path)?, Some(path)),
                None => (ShopConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory persisted records live in.
    pub fn data_dir(&self) -> PathBuf {
        match self.config.storage.dir {
            Some(ref dir) => expand_home(dir),
            None => dirs_path().join("shop"),
        }
    }

    /// The seeded catalog with the configured delay.
    pub fn catalog(&self) -> InMemoryCatalog {
        InMemoryCatalog::seeded().with_latency(self.config.latency())
    }

    fn storage(&self) -> Result<FileStorage> {
        let dir = self.data_dir();
        FileStorage::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))
    }

    /// Open the persisted cart, reporting changes through `output`.
    pub fn cart(&self) -> Result<CartStore<FileStorage, Output>> {
        let key = &self.config.storage.cart_key;
        CartStore::with_key(self.storage()?, self.output.clone(), key.clone())
            .with_context(|| format!("Invalid cart key in config: {key:?}"))
    }

    /// Read the persisted cart without opening a store.
    pub fn cart_state(&self) -> Result<CartState> {
        Ok(load_cart(&self.storage()?, &self.config.storage.cart_key))
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to the working directory.
pub fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = expand_home(Path::new(path));
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".shop.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, root.path().join(".shop.toml"));
    }

    #[test]
    fn test_find_config_prefers_shop_toml() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("shop.json"), "{}").unwrap();
        std::fs::write(root.path().join("shop.toml"), "").unwrap();

        assert_eq!(find_config(root.path()), Some(root.path().join("shop.toml")));
    }

    #[test]
    fn test_resolve_relative_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "shop.toml"), PathBuf::from("/work/shop.toml"));
        assert_eq!(resolve_path(cwd, "/etc/shop.toml"), PathBuf::from("/etc/shop.toml"));
    }
}
