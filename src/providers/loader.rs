//! Provider loader for building the registry from configuration

use super::adapter::HttpAdapter;
use super::registry::ProviderRegistry;
use super::traits::Provider;
use super::{github, kaggle, semantic_scholar, youtube};
use crate::config::{ProviderConfig, Settings};
use crate::metrics::Metrics;
use crate::network::HttpClient;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Build one adapter per enabled provider, sharing `client` and `metrics`
    pub fn load(
        settings: &Settings,
        client: &HttpClient,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();

        for config in settings.providers.iter().filter(|p| p.disabled) {
            info!("Skipping disabled provider: {}", config.name);
        }

        for config in settings.enabled_providers() {
            let provider = match Self::create_provider(&config.provider, config) {
                Ok(provider) => provider,
                Err(e) => {
                    warn!("Failed to load provider {}: {}", config.name, e);
                    continue;
                }
            };

            if provider.category() != config.category {
                warn!(
                    "Provider {} serves '{}', not the configured '{}'; skipping",
                    config.name,
                    provider.category(),
                    config.category
                );
                continue;
            }

            let timeout = Self::effective_timeout(settings, config, provider.as_ref());
            let mut adapter = HttpAdapter::new(provider, client.clone(), timeout)
                .with_description_max_len(settings.search.description_max_len);
            if let Some(ref metrics) = metrics {
                adapter = adapter.with_metrics(metrics.clone());
            }

            info!(
                "Loaded provider: {} ({}) for '{}' with timeout {:?}",
                config.name, config.provider, config.category, timeout
            );
            if registry.register(Arc::new(adapter)).is_some() {
                warn!("Provider {} replaced an earlier provider for '{}'", config.name, config.category);
            }
        }

        info!("Loaded {} providers", registry.len());
        Ok(registry)
    }

    /// Create a provider instance by implementation name
    fn create_provider(provider_type: &str, config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
        let mut provider: Box<dyn Provider> = match provider_type {
            "github" => Box::new(github::GitHub::new()),
            "youtube" => Box::new(youtube::YouTube::new()),
            "semantic_scholar" => Box::new(semantic_scholar::SemanticScholar::new()),
            "kaggle" => Box::new(kaggle::Kaggle::new()),
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown provider type: {} (available: {})",
                    provider_type,
                    Self::available_providers().join(", ")
                ));
            }
        };

        provider.init(config)?;

        if !provider.is_configured() {
            warn!(
                "Provider {} is missing credentials; its searches will return no results",
                config.name
            );
        }

        Ok(Arc::from(provider))
    }

    /// Configured timeout, else the provider default, else the global one; capped
    fn effective_timeout(settings: &Settings, config: &ProviderConfig, provider: &dyn Provider) -> Duration {
        let seconds = config
            .timeout
            .or_else(|| provider.timeout())
            .unwrap_or(settings.outgoing.request_timeout)
            .min(settings.outgoing.max_request_timeout);
        Duration::from_secs_f64(seconds)
    }

    /// Get list of available provider types
    pub fn available_providers() -> Vec<&'static str> {
        vec!["github", "youtube", "semantic_scholar", "kaggle"]
    }
}
