//! Basic Matcher: field-weighted substring scoring of one query string.
//!
//! # Scoring
//!
//! | Field | Exact (query ⊂ field) | Partial (token ⊂ field) |
//! |-------|-----------------------|-------------------------|
//! | title | 8 | 4 |
//! | keywords | 5 | 2.5 |
//! | description | 3 | 1.5 |
//!
//! Field hits are independent and additive. Partial (fuzzy) matching only
//! runs when fuzzy mode is on *and* no field matched the whole query; every
//! token of at least two characters then contributes on its own.
//!
//! Containment is one-directional here: the field must contain the query or
//! token. `"呼吸法"` does not match a field that only says `"呼吸"`.

use super::text;
use crate::types::{Course, MatchField, MatchTag, ScoredCourse};

/// Per-field weights for one matching mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub title: f64,
    pub keywords: f64,
    pub description: f64,
}

impl Weights {
    fn get(&self, field: MatchField) -> f64 {
        match field {
            MatchField::Title => self.title,
            MatchField::Keyword => self.keywords,
            MatchField::Description => self.description,
        }
    }
}

pub const EXACT_WEIGHTS: Weights = Weights { title: 8.0, keywords: 5.0, description: 3.0 };
pub const PARTIAL_WEIGHTS: Weights = Weights { title: 4.0, keywords: 2.5, description: 1.5 };

/// Score every course in `corpus` against `query`.
///
/// Returns only courses with a positive score, sorted descending by score.
/// The sort is stable: ties keep corpus order. Callers are expected to handle
/// the empty query themselves; an empty query matches every field.
pub fn match_courses(query: &str, corpus: &[Course], fuzzy: bool) -> Vec<ScoredCourse> {
    let needle = text::fold(query);
    let tokens: Vec<&str> = if fuzzy { text::tokenize(&needle).collect() } else { Vec::new() };

    let mut results: Vec<ScoredCourse> = corpus
        .iter()
        .filter_map(|course| score_course(course, &needle, &tokens))
        .collect();

    sort_by_score(&mut results);
    tracing::debug!(query, fuzzy, hits = results.len(), "basic match");
    results
}

/// Stable descending sort by score.
pub fn sort_by_score(results: &mut [ScoredCourse]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn score_course(course: &Course, needle: &str, tokens: &[&str]) -> Option<ScoredCourse> {
    let fields = FoldedFields::new(course);
    let mut score = 0.0;
    let mut tags = Vec::new();

    for (field, haystack) in fields.iter() {
        if haystack.contains(needle) {
            score += EXACT_WEIGHTS.get(field);
            push_unique(&mut tags, MatchTag::exact(field));
        }
    }

    // `tokens` is empty unless fuzzy mode is on.
    if score == 0.0 {
        for token in tokens {
            for (field, haystack) in fields.iter() {
                if haystack.contains(token) {
                    score += PARTIAL_WEIGHTS.get(field);
                    push_unique(&mut tags, MatchTag::partial(field));
                }
            }
        }
    }

    (score > 0.0).then(|| ScoredCourse::new(course.clone(), score, tags))
}

fn push_unique(tags: &mut Vec<MatchTag>, tag: MatchTag) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Lowercased copies of the searched fields of one course.
struct FoldedFields {
    title: String,
    keywords: String,
    description: String,
}

impl FoldedFields {
    fn new(course: &Course) -> Self {
        Self {
            title: text::fold(&course.title),
            keywords: text::fold(&course.keywords),
            description: text::fold(&course.description),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (MatchField, &str)> {
        [
            (MatchField::Title, self.title.as_str()),
            (MatchField::Keyword, self.keywords.as_str()),
            (MatchField::Description, self.description.as_str()),
        ]
        .into_iter()
    }
}
