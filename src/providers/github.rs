//! GitHub provider implementation
//!
//! Uses GitHub's official API to search for repositories.

use super::traits::*;
use crate::config::ProviderConfig;
use crate::results::{ContentCategory, SearchResult};
use anyhow::Result as AnyhowResult;

/// GitHub caps `per_page` at 100
const MAX_PER_PAGE: usize = 100;

/// GitHub repository search provider
pub struct GitHub {
    api_url: String,
    token: Option<String>,
}

impl GitHub {
    pub fn new() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: None,
        }
    }

    fn parse_item(item: &serde_json::Value, description_max_len: usize) -> Option<SearchResult> {
        let url = json_str(item, "html_url")?;
        let title = json_str(item, "full_name")?;
        let id = item.get("id").and_then(|i| i.as_u64())?;

        let description = json_str(item, "description").unwrap_or("No description available");

        let mut result = SearchResult::new(id.to_string(), title, url, ContentCategory::Code)
            .with_description(description, description_max_len)
            .with_meta("language", item.get("language").cloned().unwrap_or_default())
            .with_meta("stars", item.get("stargazers_count").and_then(|s| s.as_u64()).unwrap_or(0))
            .with_meta("forks", item.get("forks_count").and_then(|f| f.as_u64()).unwrap_or(0))
            .with_meta("updated_at", json_str(item, "updated_at"));

        let owner = item.get("owner");
        if let Some(login) = owner.and_then(|o| json_str(o, "login")) {
            result = result.with_meta("owner", login);
        }
        // Owner avatar doubles as thumbnail
        if let Some(avatar) = owner.and_then(|o| json_str(o, "avatar_url")) {
            result = result.with_thumbnail(avatar);
        }

        Some(result)
    }
}

impl Default for GitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for GitHub {
    fn name(&self) -> &str {
        "github"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Code
    }

    fn request(&self, params: &RequestParams) -> AnyhowResult<ProviderRequest> {
        let per_page = params.max_results.clamp(1, MAX_PER_PAGE);

        let mut request = ProviderRequest::get(format!("{}/search/repositories", self.api_url))
            .param("q", params.query.clone())
            .param("per_page", per_page.to_string())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        Ok(request)
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
        self.token = config.api_key.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(text: &str) -> ProviderResponse {
        ProviderResponse {
            status: 200,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_github_request() {
        let github = GitHub::new();
        let params = RequestParams::new("rust", 10);
        let request = github.request(&params).unwrap();

        assert!(request.url.starts_with("https://api.github.com/search/repositories"));
        assert_eq!(request.params.get("q"), Some(&"rust".to_string()));
        assert_eq!(request.params.get("per_page"), Some(&"10".to_string()));
        assert!(request.headers.contains_key("Accept"));
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_github_request_with_token() {
        let mut github = GitHub::new();
        github
            .init(&ProviderConfig {
                api_key: Some("ghp_x".to_string()),
                base_url: Some("http://localhost:1234/".to_string()),
                ..Default::default()
            })
            .unwrap();

        let request = github.request(&RequestParams::new("rust", 500)).unwrap();
        assert_eq!(request.url, "http://localhost:1234/search/repositories");
        assert_eq!(request.headers.get("Authorization"), Some(&"Bearer ghp_x".to_string()));
        assert_eq!(request.params.get("per_page"), Some(&"100".to_string()));
    }

    #[test]
    fn test_github_response() {
        let body = serde_json::json!({
            "total_count": 2,
            "items": [
                {
                    "id": 1,
                    "full_name": "tokio-rs/tokio",
                    "html_url": "https://github.com/tokio-rs/tokio",
                    "description": "A runtime for writing reliable asynchronous applications",
                    "language": "Rust",
                    "stargazers_count": 25000,
                    "forks_count": 2300,
                    "updated_at": "2024-01-01T00:00:00Z",
                    "owner": {"login": "tokio-rs", "avatar_url": "https://avatars.example/t"}
                },
                {
                    "id": 2,
                    "full_name": "someone/empty",
                    "html_url": "https://github.com/someone/empty",
                    "description": null,
                    "language": null
                }
            ]
        });

        let results = GitHub::new()
            .response(ok(&body.to_string()), &RequestParams::new("tokio", 10))
            .unwrap();

        assert_eq!(results.len(), 2);
        let tokio = &results[0];
        assert_eq!(tokio.id, "1");
        assert_eq!(tokio.title, "tokio-rs/tokio");
        assert_eq!(tokio.source_type, ContentCategory::Code);
        assert_eq!(tokio.metadata["stars"], 25000);
        assert_eq!(tokio.metadata["forks"], 2300);
        assert_eq!(tokio.metadata["language"], "Rust");
        assert_eq!(tokio.thumbnail_url.as_deref(), Some("https://avatars.example/t"));

        let empty = &results[1];
        assert_eq!(empty.description, "No description available");
        assert_eq!(empty.metadata["language"], serde_json::Value::Null);
        assert_eq!(empty.metadata["updated_at"], serde_json::Value::Null);
    }

    #[test]
    fn test_github_rate_limit() {
        let response = ProviderResponse {
            status: 403,
            ..ok("{}")
        };
        let err = GitHub::new()
            .response(response, &RequestParams::new("x", 10))
            .unwrap_err();
        assert_eq!(ProviderError::classify(&err), ProviderError::AccessDenied);
    }
}
