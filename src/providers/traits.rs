//! Provider traits and types

use crate::config::ProviderConfig;
use crate::results::{ContentCategory, SearchResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// Parameters for building a provider request
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Upper bound on results the provider may return
    pub max_results: usize,
    /// Description length cap, in characters
    pub description_max_len: usize,
}

impl RequestParams {
    /// Create new request parameters
    pub fn new(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            description_max_len: 200,
        }
    }

    /// Set the description length cap
    pub fn with_description_max_len(mut self, max_len: usize) -> Self {
        self.description_max_len = max_len;
        self
    }
}

/// HTTP GET request to be made for a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl ProviderRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        serde_json::from_str(&self.text)
            .map_err(|e| ProviderError::Parse(e.to_string()).into())
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx status into the matching error
    pub fn check_status(&self) -> Result<(), ProviderError> {
        if self.is_success() {
            return Ok(());
        }
        Err(match self.status {
            401 | 403 => ProviderError::AccessDenied,
            429 => ProviderError::TooManyRequests,
            status => ProviderError::Http(status),
        })
    }
}

/// Why a provider call produced no results
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("access denied")]
    AccessDenied,
    #[error("too many requests")]
    TooManyRequests,
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
    #[error("invalid request: {0}")]
    Request(String),
}

impl ProviderError {
    /// Classify an error raised while calling a provider
    pub fn classify(err: &anyhow::Error) -> Self {
        if let Some(provider_err) = err.downcast_ref::<ProviderError>() {
            return provider_err.clone();
        }
        if let Some(http_err) = err.downcast_ref::<reqwest::Error>() {
            if http_err.is_timeout() {
                return ProviderError::Timeout;
            }
            return ProviderError::Network(http_err.to_string());
        }
        if let Some(json_err) = err.downcast_ref::<serde_json::Error>() {
            return ProviderError::Parse(json_err.to_string());
        }
        ProviderError::Request(err.to_string())
    }

    /// Stable short name used as a metrics key
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network(_) => "network_error",
            Self::Http(_) => "http_error",
            Self::AccessDenied => "access_denied",
            Self::TooManyRequests => "too_many_requests",
            Self::Parse(_) => "parse_error",
            Self::MissingCredentials(_) => "missing_credentials",
            Self::Request(_) => "request_error",
        }
    }
}

/// Translation layer between the generic query model and one upstream API
///
/// Providers only build requests and parse responses; the network call,
/// timeout and failure isolation live in [`HttpAdapter`](super::HttpAdapter).
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Category of content this provider returns
    fn category(&self) -> ContentCategory;

    /// Whether the credentials this provider needs are present
    fn is_configured(&self) -> bool {
        true
    }

    /// Default timeout in seconds, `None` uses the global one
    fn timeout(&self) -> Option<f64> {
        None
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> anyhow::Result<ProviderRequest>;

    /// Parse the HTTP response into normalized results
    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> anyhow::Result<Vec<SearchResult>>;

    /// Optional initialization from configuration (called once on startup)
    fn init(&mut self, _config: &ProviderConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Fail-soft search capability for one content category
///
/// `search` never fails: any upstream problem yields an empty sequence. It
/// never returns more than `max_results` results.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Adapter name used in logs and metrics
    fn name(&self) -> &str;

    /// Category this adapter serves
    fn category(&self) -> ContentCategory;

    /// Search the upstream provider
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult>;
}

/// Read an optional string field from a JSON object
pub(crate) fn json_str<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}
