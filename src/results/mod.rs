//! Search result handling module
//!
//! Defines the normalized result schema, relevance scoring and the
//! merge/rank step shared by every provider.

mod ranking;
pub mod scoring;
mod types;

pub use ranking::{merge_and_rank, Ranking};
pub use types::*;
