//! Semantic Search Orchestrator.
//!
//! Runs the basic matcher on the query, then once per expanded term with
//! fuzzy matching off. Courses reached only through an expanded term are
//! discounted, tagged as semantic, and merged behind the direct hits before a
//! final stable re-sort.

use super::expander::expand;
use super::matcher::{match_courses, sort_by_score};
use super::synonyms::SynonymTable;
use crate::types::{Course, ScoredCourse};
use std::collections::HashSet;

/// Multiplier applied to the score of a semantic-only hit.
pub const SEMANTIC_DISCOUNT: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticResults {
    pub results: Vec<ScoredCourse>,
    /// Every term the query expanded to, the query first.
    pub expanded_terms: Vec<String>,
}

pub fn semantic_search(
    query: &str,
    corpus: &[Course],
    table: &SynonymTable,
    fuzzy: bool,
) -> SemanticResults {
    let mut results = match_courses(query, corpus, fuzzy);
    let mut seen: HashSet<u64> = results.iter().map(ScoredCourse::id).collect();
    let direct = results.len();

    let expanded_terms = expand(query, table);
    for term in expanded_terms.iter().filter(|term| term.as_str() != query) {
        for hit in match_courses(term, corpus, false) {
            // First expanded term in order wins.
            if seen.insert(hit.id()) {
                results.push(hit.into_semantic(term, SEMANTIC_DISCOUNT));
            }
        }
    }

    tracing::debug!(
        query,
        direct,
        semantic = results.len() - direct,
        terms = expanded_terms.len(),
        "semantic search"
    );

    sort_by_score(&mut results);
    SemanticResults { results, expanded_terms }
}
