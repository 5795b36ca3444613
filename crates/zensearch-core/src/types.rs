//! Core types for zensearch-core.
//!
//! This module defines the data structures shared across every layer: the
//! [`Course`] record, the validated [`Corpus`], the [`ScoredCourse`] result,
//! and the [`MatchTag`] describing which field produced a hit.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Course
// ---------------------------------------------------------------------------

/// A single catalog entry, as loaded from the course data file.
///
/// Only `title`, `keywords` and `description` are searched. The remaining
/// fields are passed through to results and used for insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    /// Comma-joined short phrases, e.g. `"入门, 呼吸"`.
    pub keywords: String,
    pub description: String,
    #[serde(default)]
    pub level: String,
    /// Length in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub category: String,
}

// ---------------------------------------------------------------------------
// Corpus
// ---------------------------------------------------------------------------

/// The validated, immutable list of courses searched per query.
///
/// A `Corpus` can only be built through [`Corpus::new`] or one of the JSON
/// constructors, so every instance is guaranteed to have unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    courses: Vec<Course>,
}

impl Corpus {
    /// Wrap a list of courses, rejecting duplicate ids.
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut ids = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !ids.insert(course.id) {
                return Err(SearchError::malformed(format!(
                    "duplicate course id {}",
                    course.id
                )));
            }
        }
        Ok(Self { courses })
    }

    /// Parse a JSON array of course objects.
    ///
    /// Invalid JSON is [`SearchError::DataUnavailable`]; valid JSON of the
    /// wrong shape is [`SearchError::MalformedCorpus`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
            SearchError::data_unavailable(format!("error parsing courses data: {e}"))
        })?;

        if !value.is_array() {
            return Err(SearchError::malformed("expected a JSON array of courses"));
        }

        let courses: Vec<Course> = serde_json::from_value(value).map_err(SearchError::malformed)?;
        Self::new(courses)
    }

    pub fn from_json_str(src: &str) -> Result<Self> {
        Self::from_json_slice(src.as_bytes())
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn into_courses(self) -> Vec<Course> {
        self.courses
    }
}

// ---------------------------------------------------------------------------
// Match tags
// ---------------------------------------------------------------------------

/// Which searched field produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Title,
    Keyword,
    Description,
}

impl MatchField {
    pub const ALL: [MatchField; 3] = [MatchField::Title, MatchField::Keyword, MatchField::Description];

    fn as_str(self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Keyword => "keyword",
            MatchField::Description => "description",
        }
    }
}

const SEMANTIC_PREFIX: &str = "semantic-";
const PARTIAL_SUFFIX: &str = "-partial";
const MATCH_SUFFIX: &str = "-match";

/// Tag describing how a course was hit: field, exact vs. partial (fuzzy
/// token) matching, and whether the hit came from an expanded term.
///
/// Serialised as text, e.g. `title-match`, `keyword-partial-match`,
/// `semantic-description-match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MatchTag {
    pub field: MatchField,
    pub partial: bool,
    pub semantic: bool,
}

impl MatchTag {
    pub fn exact(field: MatchField) -> Self {
        Self { field, partial: false, semantic: false }
    }

    pub fn partial(field: MatchField) -> Self {
        Self { field, partial: true, semantic: false }
    }

    /// The same tag re-labelled as a semantic (expanded-term) hit.
    pub fn into_semantic(self) -> Self {
        Self { semantic: true, ..self }
    }
}

impl fmt::Display for MatchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.semantic {
            f.write_str(SEMANTIC_PREFIX)?;
        }
        f.write_str(self.field.as_str())?;
        if self.partial {
            f.write_str(PARTIAL_SUFFIX)?;
        }
        f.write_str(MATCH_SUFFIX)
    }
}

impl FromStr for MatchTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (semantic, rest) = match s.strip_prefix(SEMANTIC_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest
            .strip_suffix(MATCH_SUFFIX)
            .ok_or_else(|| format!("unknown match type: {s}"))?;
        let (partial, field) = match rest.strip_suffix(PARTIAL_SUFFIX) {
            Some(field) => (true, field),
            None => (false, rest),
        };
        let field = MatchField::ALL
            .into_iter()
            .find(|f| f.as_str() == field)
            .ok_or_else(|| format!("unknown match type: {s}"))?;
        Ok(Self { field, partial, semantic })
    }
}

impl From<MatchTag> for String {
    fn from(tag: MatchTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for MatchTag {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// ScoredCourse
// ---------------------------------------------------------------------------

/// A course augmented with its relevance for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCourse {
    #[serde(flatten)]
    pub course: Course,
    /// Sum of weighted field hits. Always `> 0` for a returned result.
    pub score: f64,
    /// Deduplicated tags in order of first appearance.
    pub match_types: Vec<MatchTag>,
    /// True only when the course was found solely through an expanded term.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub semantic_match: bool,
    /// The expanded term that found a semantic-only result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,
}

impl ScoredCourse {
    pub fn new(course: Course, score: f64, match_types: Vec<MatchTag>) -> Self {
        Self {
            course,
            score,
            match_types,
            semantic_match: false,
            matched_term: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.course.id
    }

    /// Re-label a direct hit on `term` as a semantic-only hit, discounting its
    /// score by `discount`.
    pub fn into_semantic(self, term: &str, discount: f64) -> Self {
        Self {
            score: self.score * discount,
            match_types: self.match_types.into_iter().map(MatchTag::into_semantic).collect(),
            semantic_match: true,
            matched_term: Some(term.to_string()),
            course: self.course,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
