//! Type-ahead suggestions from search history and the synonym table.

use super::synonyms::SynonymTable;
use super::text;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    History,
    Semantic,
}

impl SuggestionKind {
    /// Short label shown next to a suggestion.
    pub fn label(self) -> &'static str {
        match self {
            SuggestionKind::History => "历史",
            SuggestionKind::Semantic => "相关",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

/// Suggestions for a partially typed `query`.
///
/// Queries under two characters get nothing. History entries containing the
/// query come first, then concept names and terms containing it, each text at
/// most once, capped at `limit`.
pub fn suggest<S: AsRef<str>>(
    query: &str,
    history: &[S],
    table: &SynonymTable,
    limit: usize,
) -> Vec<Suggestion> {
    if query.chars().count() < text::MIN_TOKEN_CHARS {
        return Vec::new();
    }
    let folded = text::fold(query);
    let needle = folded.as_str();

    let from_history = history
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .filter(|entry| text::fold(entry).contains(needle))
        .map(|entry| (entry, SuggestionKind::History));

    let from_table = table.concepts().iter().flat_map(move |concept| {
        std::iter::once((concept.name.as_str(), concept.folded_name()))
            .chain(
                concept
                    .terms
                    .iter()
                    .map(String::as_str)
                    .zip(concept.folded_terms().iter().map(String::as_str)),
            )
            .filter(move |(_, candidate)| candidate.contains(needle))
            .map(|(text, _)| (text, SuggestionKind::Semantic))
    });

    let mut seen = HashSet::new();
    let mut suggestions: Vec<Suggestion> = from_history
        .chain(from_table)
        .filter(|(text, _)| seen.insert(*text))
        .take(limit)
        .map(|(text, kind)| Suggestion { text: text.to_string(), kind })
        .collect();

    suggestions.sort_by_key(|s| s.kind);
    suggestions
}
