//! Domain-specific assertion macros for zensearch harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! ranking invariant was violated.

/// Assert that a result list is sorted by descending score.
///
/// ```rust
/// assert_sorted_desc!(response.items);
/// ```
#[macro_export]
macro_rules! assert_sorted_desc {
    ($items:expr) => {{
        let items: &[zensearch_core::ScoredCourse] = &$items;
        for pair in items.windows(2) {
            if pair[0].score < pair[1].score {
                panic!(
                    "assert_sorted_desc! failed: course {} ({}) ranked above course {} ({})",
                    pair[0].course.id, pair[0].score, pair[1].course.id, pair[1].score
                );
            }
        }
    }};
}

/// Assert that no course id appears twice in a result list.
#[macro_export]
macro_rules! assert_unique_ids {
    ($items:expr) => {{
        let items: &[zensearch_core::ScoredCourse] = &$items;
        let mut seen = std::collections::HashSet::new();
        for item in items {
            if !seen.insert(item.course.id) {
                panic!(
                    "assert_unique_ids! failed: course {} appears more than once.\n  ids: {:?}",
                    item.course.id,
                    items.iter().map(|i| i.course.id).collect::<Vec<_>>()
                );
            }
        }
    }};
}

/// Return the ids of a result list, in rank order.
pub fn ids(items: &[zensearch_core::ScoredCourse]) -> Vec<u64> {
    items.iter().map(|i| i.course.id).collect()
}

/// Compare two scores with a tolerance for the semantic discount.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
