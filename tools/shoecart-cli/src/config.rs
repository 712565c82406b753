//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use shoecart_core::cart::default_cart_key;
use shoecart_data::{FetchPolicy, RetryPolicy};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Storefront API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local cart storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:3333`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a failed request (5xx, timeout, connection).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl ApiConfig {
    /// Fetch policy for the API client.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            Duration::from_millis(self.timeout_ms),
            RetryPolicy::new(self.max_retries),
        )
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Local cart storage settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory for the saved cart (default: `~/.local/share/shoecart`).
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Key the cart is saved under.
    #[serde(default = "default_cart_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_cart_key(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "error".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
