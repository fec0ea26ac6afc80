//! Search execution and orchestration

use super::models::{AggregateResponse, SearchQuery, SearchRequest};
use crate::config::SearchSettings;
use crate::error::Result;
use crate::history::{HistoryRecorder, SearchRecord};
use crate::metrics::Metrics;
use crate::providers::ProviderRegistry;
use crate::results::{merge_and_rank, ContentCategory, SearchResult};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Universal search orchestrator
///
/// Fans a query out to one adapter per requested category, waits for all of
/// them, then scores and ranks the combined results. Holds no per-request
/// state, so one instance serves all requests.
pub struct Search {
    /// Category to adapter mapping, fixed at startup
    registry: Arc<ProviderRegistry>,
    /// Limits and category defaults
    settings: SearchSettings,
    /// Optional search-history sink
    history: Option<HistoryRecorder>,
    /// Optional metrics collector
    metrics: Option<Arc<Metrics>>,
}

impl Search {
    /// Create a new orchestrator
    pub fn new(registry: Arc<ProviderRegistry>, settings: SearchSettings) -> Self {
        Self {
            registry,
            settings,
            history: None,
            metrics: None,
        }
    }

    /// Record completed searches through `history`
    pub fn with_history(mut self, history: HistoryRecorder) -> Self {
        self.history = Some(history);
        self
    }

    /// Count searches in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Validate a raw request and execute it
    pub async fn search(&self, request: &SearchRequest) -> Result<AggregateResponse> {
        let query = SearchQuery::from_request(request, &self.settings, &self.registry)?;
        let response = self.execute(&query).await;

        if let Some(ref history) = self.history {
            history.record(SearchRecord::new(
                query.query(),
                response.total_results,
                query.categories(),
            ));
        }

        Ok(response)
    }

    /// Execute a validated query across its categories
    pub async fn execute(&self, query: &SearchQuery) -> AggregateResponse {
        if let Some(ref metrics) = self.metrics {
            metrics.inc_search();
        }

        let start = Instant::now();

        // All adapter futures are polled together; none waits on another
        let futures: Vec<_> = query
            .categories()
            .iter()
            .filter_map(|category| {
                let adapter = self.registry.get(*category)?.clone();
                let category = *category;
                Some(async move {
                    let results = adapter.search(query.query(), query.provider_limit()).await;
                    (category, results)
                })
            })
            .collect();

        info!(
            "Executing search '{}' on {} providers",
            query.query(),
            futures.len()
        );

        let per_category: Vec<(ContentCategory, Vec<SearchResult>)> = join_all(futures).await;

        for (category, results) in &per_category {
            debug!("Category {} returned {} results", category, results.len());
        }

        let ranking = merge_and_rank(query.query(), per_category, query.limit());

        debug!(
            "Search '{}' ranked {} of {} results in {:?}",
            query.query(),
            ranking.results.len(),
            ranking.total,
            start.elapsed()
        );

        AggregateResponse {
            query: query.query().to_string(),
            total_results: ranking.total,
            results: ranking.results,
            results_by_type: ranking.by_category,
        }
    }
}
