//! Error types returned to callers of the orchestrator.
//!
//! Only request validation can fail a search. Provider failures never reach
//! this type; they are absorbed by the adapters (see [`ProviderError`]).
//!
//! [`ProviderError`]: crate::providers::ProviderError

/// Request-level validation failure, raised before any provider is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The query text is empty or whitespace-only.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The requested limit is zero or negative.
    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(i64),

    /// The request named an empty list of content types.
    #[error("content_types must not be an empty list")]
    NoCategories,

    /// A category name was not recognised (strict mode only).
    #[error("unknown content type: {0}")]
    UnknownCategory(String),
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, SearchError>;
