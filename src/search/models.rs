//! Search request, validated query and aggregate response models

use crate::config::SearchSettings;
use crate::error::{Result, SearchError};
use crate::providers::ProviderRegistry;
use crate::results::{ContentCategory, SearchResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Raw search request as received from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// Requested content types; `None` means the configured defaults
    #[serde(default)]
    pub content_types: Option<Vec<String>>,
    /// Maximum number of ranked results; `None` means the configured default
    #[serde(default)]
    pub limit: Option<i64>,
}

impl SearchRequest {
    /// Create a request for the default categories and limit
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            content_types: None,
            limit: None,
        }
    }

    /// Set requested content types
    pub fn with_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set limit
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A validated, immutable search query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    query: String,
    categories: Vec<ContentCategory>,
    limit: usize,
    provider_limit: usize,
}

impl SearchQuery {
    /// Validate a request against the settings and the registered providers.
    ///
    /// Categories keep request order with duplicates removed. Unknown names
    /// and categories without a provider are dropped, unless
    /// `strict_categories` is set, in which case unknown names are an error.
    /// The resolved set may be empty; only an explicitly empty
    /// `content_types` list is rejected.
    pub fn from_request(
        request: &SearchRequest,
        settings: &SearchSettings,
        registry: &ProviderRegistry,
    ) -> Result<Self> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let limit = match request.limit {
            None => settings.default_limit,
            Some(limit) if limit <= 0 => return Err(SearchError::InvalidLimit(limit)),
            Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
        };

        let requested: Vec<ContentCategory> = match request.content_types {
            None => settings.default_categories.clone(),
            Some(ref names) if names.is_empty() => return Err(SearchError::NoCategories),
            Some(ref names) => {
                let mut parsed = Vec::with_capacity(names.len());
                for name in names {
                    match name.parse::<ContentCategory>() {
                        Ok(category) => parsed.push(category),
                        Err(_) if settings.strict_categories => {
                            return Err(SearchError::UnknownCategory(name.clone()))
                        }
                        Err(_) => debug!("Ignoring unknown content type: {}", name),
                    }
                }
                parsed
            }
        };

        let mut categories = Vec::with_capacity(requested.len());
        for category in requested {
            if !registry.contains(category) {
                debug!("Ignoring content type without a provider: {}", category);
                continue;
            }
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        if categories.is_empty() {
            debug!("No requested content type has a provider; nothing to search");
        }

        Ok(Self {
            query: query.to_string(),
            categories,
            limit,
            provider_limit: limit.min(settings.max_limit),
        })
    }

    /// Query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Resolved categories in dispatch order
    pub fn categories(&self) -> &[ContentCategory] {
        &self.categories
    }

    /// Maximum number of ranked results
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Results requested from each provider, `limit` capped at `max_limit`
    pub fn provider_limit(&self) -> usize {
        self.provider_limit
    }
}

/// Aggregate response returned for one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// The original query string
    pub query: String,
    /// Result count before truncation to the limit
    pub total_results: usize,
    /// Globally ranked results, at most `limit` long
    pub results: Vec<SearchResult>,
    /// Untruncated results per requested category
    pub results_by_type: BTreeMap<ContentCategory, Vec<SearchResult>>,
}
