//! Highlight ranges for rendering matched substrings.
//!
//! Produces byte ranges into the original text rather than marked-up
//! strings, so each front end can style them its own way.

use super::text;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Occurrence of the literal query.
    Direct,
    /// Occurrence of an expanded term.
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub range: Range<usize>,
    pub kind: HighlightKind,
}

/// Non-overlapping highlight ranges in `content`, ordered by position.
///
/// Query occurrences are placed first; expanded-term occurrences fill in
/// wherever they do not overlap an existing range. Terms shorter than two
/// characters are ignored.
pub fn highlight_ranges(content: &str, query: &str, expanded_terms: &[String]) -> Vec<Highlight> {
    let query = query.trim();
    if query.is_empty() || content.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<Highlight> = text::find_ci_ranges(content, query)
        .into_iter()
        .map(|range| Highlight { range, kind: HighlightKind::Direct })
        .collect();

    let terms = expanded_terms
        .iter()
        .filter(|term| term.as_str() != query && term.chars().count() >= text::MIN_TOKEN_CHARS);
    for term in terms {
        for range in text::find_ci_ranges(content, term) {
            if !out.iter().any(|h| overlaps(&h.range, &range)) {
                out.push(Highlight { range, kind: HighlightKind::Semantic });
            }
        }
    }

    out.sort_by_key(|h| h.range.start);
    out
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
