//! Fail-soft adapter wrapping a provider with the shared HTTP client

use super::traits::{Adapter, Provider, ProviderError, RequestParams};
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::results::{ContentCategory, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs a [`Provider`] over HTTP with a bounded timeout.
///
/// Every failure (request building, network, status, parsing, timeout) is
/// logged and recorded, and the search degrades to an empty result list.
pub struct HttpAdapter {
    provider: Arc<dyn Provider>,
    client: HttpClient,
    timeout: Duration,
    description_max_len: usize,
    metrics: Option<Arc<Metrics>>,
}

impl HttpAdapter {
    /// Create a new adapter
    pub fn new(provider: Arc<dyn Provider>, client: HttpClient, timeout: Duration) -> Self {
        Self {
            provider,
            client,
            timeout,
            description_max_len: 200,
            metrics: None,
        }
    }

    /// Set the description length cap
    pub fn with_description_max_len(mut self, max_len: usize) -> Self {
        self.description_max_len = max_len;
        self
    }

    /// Record call outcomes into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run the provider call, surfacing the failure cause
    pub async fn try_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        let params = RequestParams::new(query, max_results)
            .with_description_max_len(self.description_max_len);

        let request = self
            .provider
            .request(&params)
            .map_err(|e| ProviderError::classify(&e))?;

        let response = match timeout(
            self.timeout,
            self.client.execute(request, self.timeout),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(ProviderError::classify(&e)),
            Err(_) => return Err(ProviderError::Timeout),
        };

        let mut results = self
            .provider
            .response(response, &params)
            .map_err(|e| ProviderError::classify(&e))?;

        results.truncate(max_results);
        Ok(results)
    }
}

#[async_trait]
impl Adapter for HttpAdapter {
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn category(&self) -> ContentCategory {
        self.provider.category()
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let name = self.provider.name();
        let start = Instant::now();

        match self.try_search(query, max_results).await {
            Ok(results) => {
                let elapsed = start.elapsed();
                debug!(
                    provider = name,
                    count = results.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "provider returned results"
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.record_success(name, elapsed.as_millis() as u64);
                }
                results
            }
            Err(err) => {
                warn!(
                    provider = name,
                    category = %self.provider.category(),
                    error = %err,
                    "provider search failed"
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.record_error(name, err.kind());
                }
                Vec::new()
            }
        }
    }
}
