//! Search orchestration module
//!
//! Validates requests, fans them out to the registered providers and
//! assembles the ranked aggregate response.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
