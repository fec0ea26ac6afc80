//! Merging per-category result sequences into one global ranking

use super::scoring::score;
use super::types::{ContentCategory, SearchResult};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Output of [`merge_and_rank`]
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Global ranking, truncated to the requested limit
    pub results: Vec<SearchResult>,
    /// Number of results before truncation
    pub total: usize,
    /// Untruncated, scored results per category
    pub by_category: BTreeMap<ContentCategory, Vec<SearchResult>>,
}

/// Score, merge and rank per-category results.
///
/// `per_category` must be in dispatch order. The global sort is stable, so
/// equal scores keep dispatch order first and provider order second.
pub fn merge_and_rank(
    query: &str,
    per_category: Vec<(ContentCategory, Vec<SearchResult>)>,
    limit: usize,
) -> Ranking {
    let mut by_category = BTreeMap::new();
    let mut global = Vec::new();

    for (category, mut results) in per_category {
        for result in results.iter_mut() {
            result.relevance_score = score(query, result);
        }
        global.extend(results.iter().cloned());
        by_category.insert(category, results);
    }

    // Vec::sort_by is stable
    global.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });

    let total = global.len();
    global.truncate(limit);

    Ranking {
        results: global,
        total,
        by_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(id: &str, title: &str, category: ContentCategory) -> SearchResult {
        SearchResult::new(id, title, format!("https://example.com/{}", id), category)
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let ranking = merge_and_rank(
            "rust",
            vec![(
                ContentCategory::Code,
                vec![
                    make_result("a", "python", ContentCategory::Code),
                    make_result("b", "rust", ContentCategory::Code),
                ],
            )],
            10,
        );

        assert_eq!(ranking.results[0].id, "b");
        assert_eq!(ranking.results[1].id, "a");
        assert!(ranking.results[0].relevance_score > ranking.results[1].relevance_score);
    }

    #[test]
    fn test_ties_keep_dispatch_then_provider_order() {
        let ranking = merge_and_rank(
            "nothing matches",
            vec![
                (
                    ContentCategory::Paper,
                    vec![
                        make_result("p1", "x", ContentCategory::Paper),
                        make_result("p2", "y", ContentCategory::Paper),
                    ],
                ),
                (
                    ContentCategory::Code,
                    vec![make_result("c1", "z", ContentCategory::Code)],
                ),
            ],
            10,
        );

        let ids: Vec<&str> = ranking.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "c1"]);
    }

    #[test]
    fn test_truncation_keeps_total_and_categories() {
        let results: Vec<SearchResult> = (0..5)
            .map(|i| make_result(&i.to_string(), "t", ContentCategory::Dataset))
            .collect();

        let ranking = merge_and_rank("t", vec![(ContentCategory::Dataset, results)], 2);

        assert_eq!(ranking.results.len(), 2);
        assert_eq!(ranking.total, 5);
        assert_eq!(ranking.by_category[&ContentCategory::Dataset].len(), 5);
    }

    #[test]
    fn test_empty_categories_are_kept() {
        let ranking = merge_and_rank(
            "q",
            vec![
                (ContentCategory::Video, vec![]),
                (ContentCategory::Code, vec![]),
            ],
            10,
        );

        assert!(ranking.results.is_empty());
        assert_eq!(ranking.total, 0);
        assert_eq!(ranking.by_category.len(), 2);
        assert!(ranking.by_category[&ContentCategory::Video].is_empty());
    }

    #[test]
    fn test_category_results_carry_scores() {
        let ranking = merge_and_rank(
            "rust",
            vec![(
                ContentCategory::Code,
                vec![make_result("a", "rust", ContentCategory::Code)],
            )],
            10,
        );

        assert!((ranking.by_category[&ContentCategory::Code][0].relevance_score - 1.0).abs() < f64::EPSILON);
    }
}
