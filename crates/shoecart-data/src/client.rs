//! Storefront API client with timeout and retry.

use std::time::Duration;

use async_trait::async_trait;
use http::header::ACCEPT;
use serde::de::DeserializeOwned;
use shoecart_core::catalog::{CatalogClient, LookupError, Product, Stock, StockClient};
use shoecart_core::ProductId;

use crate::error::FetchError;
use crate::retry::RetryPolicy;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout for each attempt.
    pub timeout: Duration,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the storefront's JSON REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    policy: FetchPolicy,
}

impl ApiClient {
    /// Create a client for `base_url` with the default policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_policy(base_url, FetchPolicy::default())
    }

    /// Create a client for `base_url` with an explicit policy.
    pub fn with_policy(
        base_url: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// The API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The policy applied to every request.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch the whole catalog.
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json("products").await
    }

    /// Fetch one product.
    pub async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.get_json(&format!("products/{}", id)).await
    }

    /// Fetch the stock level of one product.
    pub async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.get_json(&format!("stock/{}", id)).await
    }

    /// GET a JSON document, retrying per the policy.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.get_once(&url).await {
                Ok(value) => return Ok(value),
                Err(err) if self.policy.retry.should_retry(&err, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    tracing::debug!(%url, attempt, ?delay, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(%url, attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogClient for ApiClient {
    async fn product_by_id(&self, id: ProductId) -> Result<Product, LookupError> {
        self.product(id).await.map_err(|e| e.into_lookup(id))
    }
}

#[async_trait]
impl StockClient for ApiClient {
    async fn stock_by_product_id(&self, id: ProductId) -> Result<Stock, LookupError> {
        self.stock(id).await.map_err(|e| e.into_lookup(id))
    }
}
