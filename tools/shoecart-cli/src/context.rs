//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shoecart_cache::FileStore;
use shoecart_core::cart::{CartStore, KvCartPersistence};
use shoecart_data::ApiClient;

use crate::config::CliConfig;
use crate::output::{ConsoleNotifier, Output};

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["shoecart.toml", ".shoecart.toml", "shoecart.json"];

/// Command line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub storage_dir: Option<String>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, overrides: Overrides, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            find_config(&cwd)
                .map(|(_, config)| config)
                .unwrap_or_default()
        };

        if let Some(url) = overrides.api_url {
            config.api.base_url = url;
        }
        if let Some(dir) = overrides.storage_dir {
            config.storage.dir = Some(PathBuf::from(dir));
        }

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// Directory holding the saved cart.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.config.storage.dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("shoecart"),
        }
    }

    /// Client for the storefront API.
    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::with_policy(&self.config.api.base_url, self.config.api.fetch_policy())
            .with_context(|| format!("Invalid API URL: {}", self.config.api.base_url))
    }

    /// Build the cart store, loading the saved cart.
    pub fn open_store(&self) -> Result<CartStore> {
        let api = Arc::new(self.api()?);
        let dir = self.storage_dir();
        let files = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        let persistence = KvCartPersistence::with_key(files, self.config.storage.key.clone());

        tracing::debug!(dir = %dir.display(), base_url = %api.base_url(), "opening cart store");

        Ok(CartStore::new(
            api.clone(),
            api,
            Box::new(persistence),
            Arc::new(ConsoleNotifier::new(self.output.clone())),
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                    return Some((config_path, config));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
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

    fn context(config: CliConfig, cwd: &Path) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join("shoecart.toml"),
            "[api]\nbase_url = \"http://shop.test\"\n",
        )
        .unwrap();

        let (path, config) = find_config(&nested).unwrap();
        assert_eq!(path, root.path().join("shoecart.toml"));
        assert_eq!(config.api.base_url, "http://shop.test");
    }

    #[test]
    fn test_relative_storage_dir_resolves_against_cwd() {
        let root = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.dir = Some(PathBuf::from("carts"));

        let ctx = context(config, root.path());
        assert_eq!(ctx.storage_dir(), root.path().join("carts"));
    }

    #[test]
    fn test_open_store_starts_empty() {
        let root = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.dir = Some(root.path().join("carts"));

        let store = context(config, root.path()).open_store().unwrap();
        assert!(store.cart().is_empty());
        assert!(root.path().join("carts").is_dir());
    }

    #[test]
    fn test_bad_api_url_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.api.base_url = "shop.test".into();

        assert!(context(config, root.path()).api().is_err());
    }
}
