//! Aggregate statistics over a page of results, shown next to semantic
//! searches.

use crate::types::ScoredCourse;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInsights {
    /// Expanded terms other than the query itself.
    pub related_terms: Vec<String>,
    /// `(category, count)` in first-seen order.
    pub categories: Vec<(String, usize)>,
    /// `(level, count)` in first-seen order.
    pub levels: Vec<(String, usize)>,
}

impl SearchInsights {
    pub fn is_empty(&self) -> bool {
        self.related_terms.is_empty() && self.categories.is_empty() && self.levels.is_empty()
    }
}

pub fn summarize(query: &str, items: &[ScoredCourse], expanded_terms: &[String]) -> SearchInsights {
    let related_terms = if expanded_terms.len() > 1 {
        expanded_terms.iter().filter(|t| t.as_str() != query).cloned().collect()
    } else {
        Vec::new()
    };

    SearchInsights {
        related_terms,
        categories: tally(items.iter().map(|i| i.course.category.as_str())),
        levels: tally(items.iter().map(|i| i.course.level.as_str())),
    }
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        match counts.iter_mut().find(|(name, _)| name == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}
