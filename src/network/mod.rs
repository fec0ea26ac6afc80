//! HTTP networking module
//!
//! Provides the shared HTTP client used by every provider adapter.

mod client;

pub use client::HttpClient;

/// Standard accept header for JSON APIs
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
