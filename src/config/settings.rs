//! Settings structures for OmniSearch configuration

use crate::results::ContentCategory;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchSettings,
    pub providers: Vec<ProviderConfig>,
    pub history: HistorySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            outgoing: OutgoingSettings::default(),
            search: SearchSettings::default(),
            providers: default_providers(),
            history: HistorySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("OMNISEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("OMNISEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("OMNISEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("CORS_ORIGINS") {
            self.server.cors_origins = val
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        // Provider credentials
        for provider in self.providers.iter_mut() {
            match provider.provider.as_str() {
                "github" => {
                    if let Some(token) = var("GITHUB_TOKEN") {
                        provider.api_key = Some(token);
                    }
                }
                "youtube" => {
                    if let Some(key) = var("YOUTUBE_API_KEY") {
                        provider.api_key = Some(key);
                    }
                }
                "semantic_scholar" => {
                    if let Some(key) = var("SEMANTIC_SCHOLAR_API_KEY") {
                        provider.api_key = Some(key);
                    }
                }
                "kaggle" => {
                    if let Some(user) = var("KAGGLE_USERNAME") {
                        provider.username = Some(user);
                    }
                    if let Some(key) = var("KAGGLE_KEY") {
                        provider.api_key = Some(key);
                    }
                }
                _ => {}
            }
        }
    }

    /// Check settings for values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.search.default_limit == 0 {
            bail!("search.default_limit must be positive");
        }
        if self.search.max_limit < self.search.default_limit {
            bail!(
                "search.max_limit ({}) is smaller than search.default_limit ({})",
                self.search.max_limit,
                self.search.default_limit
            );
        }
        if self.search.description_max_len == 0 {
            bail!("search.description_max_len must be positive");
        }
        if !is_positive_seconds(self.outgoing.request_timeout) {
            bail!("outgoing.request_timeout must be a positive number of seconds");
        }
        if !is_positive_seconds(self.outgoing.max_request_timeout) {
            bail!("outgoing.max_request_timeout must be a positive number of seconds");
        }
        for category in ContentCategory::ALL {
            let active = self
                .enabled_providers()
                .iter()
                .filter(|p| p.category == category)
                .count();
            if active > 1 {
                bail!("more than one enabled provider for category '{}'", category);
            }
        }
        for provider in &self.providers {
            if let Some(timeout) = provider.timeout {
                if !is_positive_seconds(timeout) {
                    bail!("provider {} has an invalid timeout {}", provider.name, timeout);
                }
            }
            if let Some(ref base_url) = provider.base_url {
                if let Err(e) = url::Url::parse(base_url) {
                    bail!("provider {} has an invalid base_url '{}': {}", provider.name, base_url, e);
                }
            }
        }
        Ok(())
    }

    /// Get all enabled providers
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| !p.disabled).collect()
    }
}

/// Finite and above zero; anything else cannot become a `Duration`
fn is_positive_seconds(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the API banner
    pub instance_name: String,
    /// Enable provider metrics collection
    pub enable_metrics: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "OmniSearch".to_string(),
            enable_metrics: true,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Allowed CORS origins, `*` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8001,
            bind_address: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default provider timeout in seconds
    pub request_timeout: f64,
    /// Upper bound for any provider timeout
    pub max_request_timeout: f64,
    /// User agent sent to providers
    pub useragent: String,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            max_request_timeout: 30.0,
            useragent: format!("OmniSearch/{}", env!("CARGO_PKG_VERSION")),
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Limit used when the request does not give one
    pub default_limit: usize,
    /// Largest accepted limit
    pub max_limit: usize,
    /// Description length cap, in characters
    pub description_max_len: usize,
    /// Reject unknown content types instead of ignoring them
    pub strict_categories: bool,
    /// Categories searched when the request does not name any
    pub default_categories: Vec<ContentCategory>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            description_max_len: 200,
            strict_categories: false,
            default_categories: ContentCategory::ALL.to_vec(),
        }
    }
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name (unique identifier)
    pub name: String,
    /// Provider implementation to use
    pub provider: String,
    /// Category this provider serves
    pub category: ContentCategory,
    /// Whether provider is disabled
    pub disabled: bool,
    /// Custom timeout for this provider in seconds
    pub timeout: Option<f64>,
    /// API key or token if required
    pub api_key: Option<String>,
    /// Account name for providers using basic auth
    pub username: Option<String>,
    /// Override of the upstream API base URL
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            provider: String::new(),
            category: ContentCategory::Code,
            disabled: false,
            timeout: None,
            api_key: None,
            username: None,
            base_url: None,
        }
    }
}

/// Search history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Record completed searches
    pub enabled: bool,
    /// JSON-lines file receiving the records
    pub path: Option<PathBuf>,
    /// Records buffered before new ones are dropped
    pub queue_size: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            queue_size: 256,
        }
    }
}

impl HistorySettings {
    /// Resolve the history file location
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("omnisearch")
                .join("search_history.jsonl")
        })
    }
}

/// Default provider configurations
fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "github".to_string(),
            provider: "github".to_string(),
            category: ContentCategory::Code,
            ..Default::default()
        },
        ProviderConfig {
            name: "youtube".to_string(),
            provider: "youtube".to_string(),
            category: ContentCategory::Video,
            ..Default::default()
        },
        ProviderConfig {
            name: "semantic scholar".to_string(),
            provider: "semantic_scholar".to_string(),
            category: ContentCategory::Paper,
            ..Default::default()
        },
        ProviderConfig {
            name: "kaggle".to_string(),
            provider: "kaggle".to_string(),
            category: ContentCategory::Dataset,
            ..Default::default()
        },
    ]
}
