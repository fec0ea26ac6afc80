//! Provider registry mapping each content category to its adapter

use super::traits::Adapter;
use crate::results::ContentCategory;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of the adapters available to the orchestrator
///
/// Built once at startup; at most one adapter per category.
pub struct ProviderRegistry {
    adapters: BTreeMap<ContentCategory, Arc<dyn Adapter>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Register an adapter under its category, returning any adapter it replaced
    pub fn register(&mut self, adapter: Arc<dyn Adapter>) -> Option<Arc<dyn Adapter>> {
        self.adapters.insert(adapter.category(), adapter)
    }

    /// Get the adapter for a category
    pub fn get(&self, category: ContentCategory) -> Option<&Arc<dyn Adapter>> {
        self.adapters.get(&category)
    }

    /// Check if a category has an adapter
    pub fn contains(&self, category: ContentCategory) -> bool {
        self.adapters.contains_key(&category)
    }

    /// Adapter names keyed by category
    pub fn names(&self) -> BTreeMap<ContentCategory, String> {
        self.adapters
            .iter()
            .map(|(category, adapter)| (*category, adapter.name().to_string()))
            .collect()
    }

    /// Get number of registered adapters
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
