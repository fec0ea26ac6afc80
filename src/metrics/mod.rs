//! Metrics collection module
//!
//! Tracks provider performance, error rates, and usage statistics.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Response times kept per provider
const RESPONSE_TIME_WINDOW: usize = 100;

/// Provider metrics collector
///
/// Shared by all adapters; every method takes `&self`.
pub struct Metrics {
    /// Total search count
    total_searches: AtomicU64,
    /// Per-provider counters
    providers: RwLock<HashMap<String, ProviderCounters>>,
}

#[derive(Debug, Default)]
struct ProviderCounters {
    searches: u64,
    successes: u64,
    errors: BTreeMap<String, u64>,
    response_times: VecDeque<u64>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            providers: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ProviderCounters>> {
        self.providers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ProviderCounters>> {
        self.providers.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful provider call and its latency
    pub fn record_success(&self, provider: &str, time_ms: u64) {
        let mut providers = self.write();
        let counters = providers.entry(provider.to_string()).or_default();
        counters.searches += 1;
        counters.successes += 1;

        if counters.response_times.len() >= RESPONSE_TIME_WINDOW {
            counters.response_times.pop_front();
        }
        counters.response_times.push_back(time_ms);
    }

    /// Record a failed provider call
    pub fn record_error(&self, provider: &str, kind: &str) {
        let mut providers = self.write();
        let counters = providers.entry(provider.to_string()).or_default();
        counters.searches += 1;
        *counters.errors.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get average response time for a provider
    pub fn get_avg_response_time(&self, provider: &str) -> Option<u64> {
        let providers = self.read();
        providers.get(provider).and_then(|c| avg(&c.response_times))
    }

    /// Get reliability percentage for a provider
    pub fn get_reliability(&self, provider: &str) -> f64 {
        let providers = self.read();
        providers.get(provider).map(reliability).unwrap_or(100.0)
    }

    /// Snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let providers = self.read();
        let stats = providers
            .iter()
            .map(|(name, counters)| {
                (
                    name.clone(),
                    ProviderStats {
                        searches: counters.searches,
                        successes: counters.successes,
                        errors: counters.errors.clone(),
                        avg_response_time: avg(&counters.response_times),
                        reliability: reliability(counters),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            total_searches: self.get_total_searches(),
            providers: stats,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn avg(times: &VecDeque<u64>) -> Option<u64> {
    if times.is_empty() {
        None
    } else {
        Some(times.iter().sum::<u64>() / times.len() as u64)
    }
}

fn reliability(counters: &ProviderCounters) -> f64 {
    if counters.searches == 0 {
        100.0
    } else {
        (counters.successes as f64 / counters.searches as f64) * 100.0
    }
}

/// Point-in-time view of the metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub providers: BTreeMap<String, ProviderStats>,
}

/// Statistics for a single provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStats {
    pub searches: u64,
    pub successes: u64,
    pub errors: BTreeMap<String, u64>,
    pub avg_response_time: Option<u64>,
    pub reliability: f64,
}
