//! OmniSearch: a universal search orchestrator
//!
//! Fans one query out to independent content providers (code, videos,
//! papers, datasets), tolerates individual provider failures, and returns a
//! single relevance-ranked result list together with a per-category
//! breakdown.

pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::SearchError;
pub use providers::{Adapter, Provider};
pub use results::{ContentCategory, SearchResult};
pub use search::{AggregateResponse, Search, SearchQuery, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
