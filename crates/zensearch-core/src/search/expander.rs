//! Semantic Expander: query → related terms via the synonym table.
//!
//! Matching is bidirectional containment, case-insensitive: a concept
//! applies when the query (or one of its tokens) contains the concept name or
//! one of its terms, or is contained by it. Short, generic queries therefore
//! pull in broad expansions; that is accepted behaviour.

use super::synonyms::{Concept, SynonymTable};
use super::text;
use std::collections::HashSet;

/// Expand `query` into the ordered, deduplicated list of terms to search.
///
/// The query itself is always the first element. Concepts matched by the
/// whole query come next, in table order, followed by concepts matched by
/// individual tokens.
pub fn expand(query: &str, table: &SynonymTable) -> Vec<String> {
    let folded = text::fold(query);
    let mut terms = vec![query.to_string()];

    for concept in table.concepts() {
        if concept_matches(&folded, concept) {
            push_concept(&mut terms, concept);
        }
    }

    for token in text::tokenize(&folded) {
        for concept in table.concepts() {
            if concept_matches(token, concept) {
                push_concept(&mut terms, concept);
            }
        }
    }

    let mut seen = HashSet::with_capacity(terms.len());
    terms.retain(|term| seen.insert(term.clone()));
    tracing::debug!(query, expanded = terms.len(), "query expanded");
    terms
}

fn concept_matches(needle: &str, concept: &Concept) -> bool {
    std::iter::once(concept.folded_name())
        .chain(concept.folded_terms().iter().map(String::as_str))
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| text::mutual_contains(needle, candidate))
}

fn push_concept(terms: &mut Vec<String>, concept: &Concept) {
    terms.push(concept.name.clone());
    terms.extend(concept.terms.iter().cloned());
}
