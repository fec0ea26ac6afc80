//! Semantic Scholar provider implementation
//!
//! Uses the Semantic Scholar Graph API paper search endpoint. An API key is
//! optional and only raises the rate limit.

use super::traits::*;
use crate::config::ProviderConfig;
use crate::results::{ContentCategory, SearchResult};
use anyhow::Result as AnyhowResult;
use serde::Deserialize;

/// Fields requested from the paper search endpoint
const PAPER_FIELDS: &str = "paperId,title,abstract,authors,year,citationCount,url";

/// `limit` accepted by the search endpoint
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct S2SearchResponse {
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct S2Paper {
    paper_id: String,
    title: Option<String>,
    r#abstract: Option<String>,
    #[serde(default)]
    authors: Vec<S2Author>,
    year: Option<u32>,
    citation_count: Option<u64>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

/// Semantic Scholar paper search provider
pub struct SemanticScholar {
    api_url: String,
    api_key: Option<String>,
}

impl SemanticScholar {
    pub fn new() -> Self {
        Self {
            api_url: "https://api.semanticscholar.org".to_string(),
            api_key: None,
        }
    }

    fn parse_paper(paper: S2Paper, description_max_len: usize) -> Option<SearchResult> {
        let title = paper.title.filter(|t| !t.is_empty())?;

        let url = paper
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://www.semanticscholar.org/paper/{}", paper.paper_id));

        let abstract_text = paper
            .r#abstract
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| "No abstract available".to_string());

        let authors: Vec<String> = paper.authors.into_iter().filter_map(|a| a.name).collect();

        Some(
            SearchResult::new(paper.paper_id, title, url, ContentCategory::Paper)
                .with_description(&abstract_text, description_max_len)
                .with_meta("authors", authors)
                .with_meta("year", paper.year)
                .with_meta("citations", paper.citation_count.unwrap_or(0)),
        )
    }
}

impl Default for SemanticScholar {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for SemanticScholar {
    fn name(&self) -> &str {
        "semantic scholar"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Paper
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let limit = params.max_results.clamp(1, MAX_LIMIT);

        let mut request = ProviderRequest::get(format!("{}/graph/v1/paper/search", self.api_url))
            .param("query", params.query.clone())
            .param("limit", limit.to_string())
            .param("fields", PAPER_FIELDS);

        if let Some(ref key) = self.api_key {
            request = request.header("x-api-key", key.clone());
        }

        Ok(request)
    }

    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> AnyhowResult<Vec<SearchResult>> {
        response.check_status()?;

        let body: S2SearchResponse = response.json()?;

        Ok(body
            .data
            .into_iter()
            .filter_map(|paper| Self::parse_paper(paper, params.description_max_len))
            .collect())
    }

    fn init(&mut self, config: &ProviderConfig) -> AnyhowResult<()> {
        if let Some(ref base_url) = config.base_url {
            self.api_url = base_url.trim_end_matches('/').to_string();
        }
        self.api_key = config.api_key.clone();
        Ok(())
    }
}
