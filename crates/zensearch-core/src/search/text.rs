//! Character-level text helpers shared by the matcher, the expander and the
//! highlighter.
//!
//! All comparisons are case-insensitive and operate on `char`s, so CJK and
//! other multi-byte text behaves the same as ASCII. Token length is counted in
//! characters: a single Chinese character is one character, not three bytes.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Tokens shorter than this many characters never take part in fuzzy or
/// expansion matching.
pub const MIN_TOKEN_CHARS: usize = 2;

static TOKEN_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|,|，").expect("token split pattern must compile"));

/// Lowercase `s` one char at a time, with final sigma folded to `σ`.
///
/// Context-free so that folding a substring yields a substring of the folded
/// whole.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(fold_char).collect()
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|l| if l == 'ς' { 'σ' } else { l })
}

/// Split on whitespace, `,` and `，`, keeping tokens of at least
/// [`MIN_TOKEN_CHARS`] characters.
pub fn tokenize(query: &str) -> impl Iterator<Item = &str> {
    TOKEN_SPLIT
        .split(query)
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
}

/// Either already-folded string contains the other.
pub fn mutual_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Byte ranges of every non-overlapping case-insensitive occurrence of
/// `needle` in `haystack`, scanning left to right.
///
/// Ranges always fall on `char` boundaries of the original `haystack`, even
/// when lowercasing would change the byte length of a character.
pub fn find_ci_ranges(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(fold_char).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // (byte offset, folded char) for every folded char of the haystack. A
    // source char folding to several chars contributes several entries with
    // the same offset.
    let folded: Vec<(usize, char)> = haystack
        .char_indices()
        .flat_map(|(i, c)| fold_char(c).map(move |l| (i, l)))
        .collect();

    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= folded.len() {
        let window = &folded[pos..pos + needle.len()];
        let end_pos = pos + needle.len();
        let starts_on_char = pos == 0 || folded[pos - 1].0 != folded[pos].0;
        let ends_on_char = end_pos == folded.len() || folded[end_pos].0 != folded[end_pos - 1].0;
        if starts_on_char && ends_on_char && window.iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            let start = window[0].0;
            let last = window[window.len() - 1].0;
            let end = last + haystack[last..].chars().next().map_or(0, char::len_utf8);
            ranges.push(start..end);
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_splits_on_ascii_and_fullwidth_commas() {
        let tokens: Vec<_> = tokenize("睡眠 放松,专注，呼吸法").collect();
        assert_eq!(tokens, vec!["睡眠", "放松", "专注", "呼吸法"]);
    }

    #[test]
    fn tokenize_counts_chars_not_bytes() {
        // "眠" is three bytes but one character.
        let tokens: Vec<_> = tokenize("眠 a 冥想 ab").collect();
        assert_eq!(tokens, vec!["冥想", "ab"]);
    }

    #[test]
    fn tokenize_drops_empty_pieces() {
        let tokens: Vec<_> = tokenize(" ,，  ").collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn fold_is_unicode_aware() {
        assert_eq!(fold("Mindfulness ÄÖ"), "mindfulness äö");
        assert_eq!(fold("冥想"), "冥想");
    }

    #[test]
    fn fold_ignores_word_position_of_sigma() {
        assert_eq!(fold("ς"), fold("Σ"));
        assert_eq!(fold("ΟΔΟΣ"), "οδοσ");
        assert!(fold("ΟΔΟΣΖΕΝ").contains(&fold("ΟΔΟΣ")));
    }

    #[test]
    fn find_ranges_agrees_with_fold_on_sigma() {
        assert_eq!(find_ci_ranges("ΟΔΟΣΖΕΝ", "ΟΔΟΣ"), vec![0..8]);
        assert_eq!(find_ci_ranges("ΟΔΟΣΖΕΝ", "οδος"), vec![0..8]);
    }

    #[test]
    fn mutual_contains_is_bidirectional() {
        assert!(mutual_contains("呼吸法", "呼吸"));
        assert!(mutual_contains("呼吸", "呼吸法"));
        assert!(!mutual_contains("睡眠", "呼吸"));
    }

    #[test]
    fn find_ranges_case_insensitive() {
        let text = "Meditation and MEDITATION";
        let ranges = find_ci_ranges(text, "meditation");
        assert_eq!(ranges, vec![0..10, 15..25]);
    }

    #[test]
    fn find_ranges_multibyte() {
        let text = "7天基础冥想，冥想入门";
        let ranges = find_ci_ranges(text, "冥想");
        assert_eq!(ranges.len(), 2);
        for r in ranges {
            assert_eq!(&text[r], "冥想");
        }
    }

    #[test]
    fn find_ranges_respects_char_boundaries_when_folding_expands() {
        // 'İ' lowercases to two chars ("i̇"); a match must cover it whole.
        let text = "İi";
        let ranges = find_ci_ranges(text, "i");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "i");
    }

    #[test]
    fn find_ranges_empty_needle() {
        assert!(find_ci_ranges("abc", "").is_empty());
    }
}
