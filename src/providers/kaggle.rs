//! Kaggle provider implementation
//!
//! Searches public datasets through the Kaggle REST API. Requests are
//! authenticated with HTTP basic auth using the account name and API key.

use super::traits::*;
use crate::config::ProviderConfig;
use crate::results::{ContentCategory, SearchResult};
use anyhow::Result as AnyhowResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KaggleDataset {
    #[serde(rename = "ref")]
    reference: String,
    title: Option<String>,
    subtitle: Option<String>,
    #[serde(default)]
    total_bytes: u64,
    #[serde(default)]
    file_types: Vec<String>,
    last_updated: Option<String>,
    #[serde(default)]
    download_count: u64,
    #[serde(default)]
    vote_count: u64,
    creator_name: Option<String>,
}

/// Kaggle dataset search provider
pub struct Kaggle {
    api_url: String,
    credentials: Option<(String, String)>,
}

impl Kaggle {
    pub fn new() -> Self {
        Self {
            api_url: "https://www.kaggle.com".to_string(),
            credentials: None,
        }
    }

    fn authorization(username: &str, key: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", username, key)))
    }

    fn parse_dataset(dataset: KaggleDataset, description_max_len: usize) -> SearchResult {
        let url = format!("https://www.kaggle.com/datasets/{}", dataset.reference);
        let title = dataset
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| dataset.reference.clone());
        let description = dataset
            .subtitle
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "No description available".to_string());

        SearchResult::new(dataset.reference, title, url, ContentCategory::Dataset)
            .with_description(&description, description_max_len)
            .with_meta("size", dataset.total_bytes)
            .with_meta("files", dataset.file_types)
            .with_meta("updated_at", dataset.last_updated)
            .with_meta("download_count", dataset.download_count)
            .with_meta("votes", dataset.vote_count)
            .with_meta(
                "creator",
                dataset.creator_name.unwrap_or_else(|| "Unknown".to_string()),
            )
    }
}

impl Default for Kaggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Kaggle {
    fn name(&self) -> &str {
        "kaggle"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Dataset
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn timeout(&self) -> Option<f64> {
        Some(10.0)
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let (username, key) = self
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("KAGGLE_USERNAME/KAGGLE_KEY"))?;

        Ok(ProviderRequest::get(format!("{}/api/v1/datasets/list", self.api_url))
            .param("search", params.query.clone())
            .param("page", "1")
            .header("Authorization", Self::authorization(username, key)))
    }

    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> AnyhowResult<Vec<SearchResult>> {
        response.check_status()?;

        // The list endpoint has no page size; results are cut to max_results here
        let datasets: Vec<KaggleDataset> = response.json()?;

        Ok(datasets
            .into_iter()
            .take(params.max_results)
            .map(|dataset| Self::parse_dataset(dataset, params.description_max_len))
            .collect())
    }

    fn init(&mut self, config: &ProviderConfig) -> AnyhowResult<()> {
        if let Some(ref base_url) = config.base_url {
            self.api_url = base_url.trim_end_matches('/').to_string();
        }
        self.credentials = match (&config.username, &config.api_key) {
            (Some(user), Some(key)) => Some((user.clone(), key.clone())),
            _ => None,
        };
        Ok(())
    }
}
