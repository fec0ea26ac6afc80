//! Keyword relevance scoring
//!
//! Each lowercase query term adds 1.0 when it appears in the title and 0.5
//! when it appears in the description. The sum is averaged over the number
//! of terms, so a result matching every term in both fields scores 1.5.

use super::types::SearchResult;

/// Weight of a term found in the title
pub const TITLE_WEIGHT: f64 = 1.0;

/// Weight of a term found in the description
pub const DESCRIPTION_WEIGHT: f64 = 0.5;

/// Compute the relevance score of `result` for `query`.
///
/// A query with no terms scores 0.0 for every result.
pub fn score(query: &str, result: &SearchResult) -> f64 {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return 0.0;
    }

    let title = result.title.to_lowercase();
    let description = result.description.to_lowercase();

    let total: f64 = terms
        .iter()
        .map(|term| {
            let mut contribution = 0.0;
            if title.contains(term) {
                contribution += TITLE_WEIGHT;
            }
            if description.contains(term) {
                contribution += DESCRIPTION_WEIGHT;
            }
            contribution
        })
        .sum();

    total / terms.len() as f64
}
