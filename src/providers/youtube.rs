//! YouTube provider implementation (Data API v3, API key required)

use super::traits::*;
use crate::config::ProviderConfig;
use crate::results::{ContentCategory, SearchResult};
use anyhow::Result as AnyhowResult;

/// `maxResults` accepted by `search.list`
const MAX_RESULTS_LIMIT: usize = 50;

/// YouTube video search provider
pub struct YouTube {
    api_url: String,
    api_key: Option<String>,
}

impl YouTube {
    pub fn new() -> Self {
        Self {
            api_url: "https://www.googleapis.com".to_string(),
            api_key: None,
        }
    }

    fn parse_item(item: &serde_json::Value, description_max_len: usize) -> Option<SearchResult> {
        let video_id = item
            .get("id")
            .and_then(|id| json_str(id, "videoId"))?;
        let snippet = item.get("snippet")?;
        let title = json_str(snippet, "title")?;

        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let description = json_str(snippet, "description").unwrap_or_default();

        let mut result = SearchResult::new(video_id, title, url, ContentCategory::Video)
            .with_description(description, description_max_len)
            .with_meta("channel", json_str(snippet, "channelTitle"))
            .with_meta("published_at", json_str(snippet, "publishedAt"));

        let thumbnail = snippet
            .get("thumbnails")
            .and_then(|t| t.get("medium").or_else(|| t.get("default")))
            .and_then(|t| json_str(t, "url"));
        if let Some(thumbnail) = thumbnail {
            result = result.with_thumbnail(thumbnail);
        }

        Some(result)
    }
}

impl Default for YouTube {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for YouTube {
    fn name(&self) -> &str {
        "youtube"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Video
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("YOUTUBE_API_KEY"))?;

        let max_results = params.max_results.clamp(1, MAX_RESULTS_LIMIT);

        Ok(ProviderRequest::get(format!("{}/youtube/v3/search", self.api_url))
            .param("q", params.query.clone())
            .param("part", "id,snippet")
            .param("type", "video")
            .param("maxResults", max_results.to_string())
            .param("key", api_key.clone()))
    }

    fn response(
        &self,
        response: ProviderResponse,
        params: &RequestParams,
    ) -> AnyhowResult<Vec<SearchResult>> {
        response.check_status()?;

        let json: serde_json::Value = response.json()?;
        let items = json
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| ProviderError::Parse("missing 'items' array".to_string()))?;

        Ok(items
            .iter()
            .filter_map(|item| Self::parse_item(item, params.description_max_len))
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
