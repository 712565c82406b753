//! API client error types.

use http::StatusCode;
use shoecart_core::catalog::LookupError;
use shoecart_core::ProductId;
use thiserror::Error;

/// Errors that can occur when calling the storefront API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Could not reach the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body was not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Base URL could not be used to build a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other request failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// HTTP status of the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Convert into a lookup failure for `id`.
    ///
    /// Only a 404 means the product does not exist; everything else is a
    /// transport problem.
    pub fn into_lookup(self, id: ProductId) -> LookupError {
        if self.is_not_found() {
            LookupError::NotFound(id)
        } else {
            LookupError::Transport(self.to_string())
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_timeout() {
            FetchError::Timeout(url)
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url,
            }
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> FetchError {
        FetchError::Http {
            status,
            url: "http://localhost:3333/stock/1".into(),
        }
    }

    #[test]
    fn test_not_found_maps_to_lookup_not_found() {
        let id = ProductId::new(1);
        assert_eq!(http(404).into_lookup(id), LookupError::NotFound(id));
    }

    #[test]
    fn test_other_failures_map_to_transport() {
        let id = ProductId::new(1);
        for err in [
            http(500),
            http(400),
            FetchError::Timeout("http://localhost:3333/stock/1".into()),
            FetchError::Connection("refused".into()),
            FetchError::Decode("expected value".into()),
        ] {
            assert!(matches!(err.into_lookup(id), LookupError::Transport(_)));
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            http(503).to_string(),
            "HTTP 503 for http://localhost:3333/stock/1"
        );
    }
}
