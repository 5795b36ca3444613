//! Query Facade: the one entry point both the HTTP service and the terminal
//! client call.
//!
//! The facade owns the synonym table, asks a [`CorpusProvider`] for the
//! current corpus, dispatches to the semantic or basic pipeline, and slices
//! the ranked list into one page.

use super::matcher::match_courses;
use super::semantic::{semantic_search, SemanticResults};
use super::synonyms::SynonymTable;
use crate::error::Result;
use crate::types::{Corpus, ScoredCourse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// CorpusProvider
// ---------------------------------------------------------------------------

/// Supplies the full, already-validated corpus for one query.
///
/// Implementations may hand out a cached snapshot; the facade never mutates
/// what it receives.
pub trait CorpusProvider {
    fn corpus(&self) -> Result<Arc<Corpus>>;
}

impl CorpusProvider for Arc<Corpus> {
    fn corpus(&self) -> Result<Arc<Corpus>> {
        Ok(Arc::clone(self))
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub q: String,
    pub semantic: bool,
    pub fuzzy: bool,
    pub limit: usize,
    pub offset: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            q: String::new(),
            semantic: false,
            fuzzy: true,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into(), ..Self::default() }
    }

    pub fn semantic(mut self, semantic: bool) -> Self {
        self.semantic = semantic;
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// One page of ranked results.
///
/// `limit` and `offset` are absent for the empty-query response;
/// `expanded_terms` is present only in semantic mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total: usize,
    pub items: Vec<ScoredCourse>,
    pub query: String,
    pub semantic: bool,
    pub fuzzy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_terms: Option<Vec<String>>,
}

impl SearchResponse {
    fn empty(query: String, semantic: bool, fuzzy: bool) -> Self {
        Self {
            total: 0,
            items: Vec::new(),
            query,
            semantic,
            fuzzy,
            limit: None,
            offset: None,
            expanded_terms: None,
        }
    }

    /// Pagination summary, if this response carries paging parameters.
    pub fn page_info(&self) -> Option<PageInfo> {
        Some(PageInfo::new(self.total, self.limit?, self.offset?))
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    synonyms: Arc<SynonymTable>,
}

impl SearchEngine {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Run one request end to end.
    ///
    /// An empty (after trimming) query returns the zero-result response
    /// without consulting `provider`.
    pub fn execute<P>(&self, request: &SearchRequest, provider: &P) -> Result<SearchResponse>
    where
        P: CorpusProvider + ?Sized,
    {
        let query = request.q.trim();
        if query.is_empty() {
            return Ok(SearchResponse::empty(query.to_string(), request.semantic, request.fuzzy));
        }

        let corpus = provider.corpus()?;
        let ranked = self.rank(query, &corpus, request.semantic, request.fuzzy);
        let total = ranked.results.len();
        let items: Vec<ScoredCourse> = ranked
            .results
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect();

        tracing::debug!(
            query,
            semantic = request.semantic,
            fuzzy = request.fuzzy,
            total,
            returned = items.len(),
            "search executed"
        );

        Ok(SearchResponse {
            total,
            items,
            query: query.to_string(),
            semantic: request.semantic,
            fuzzy: request.fuzzy,
            limit: Some(request.limit),
            offset: Some(request.offset),
            expanded_terms: request.semantic.then_some(ranked.expanded_terms),
        })
    }

    /// The full ranked list for `query`, before pagination.
    pub fn rank(&self, query: &str, corpus: &Corpus, semantic: bool, fuzzy: bool) -> SemanticResults {
        if semantic {
            semantic_search(query, corpus.courses(), &self.synonyms, fuzzy)
        } else {
            SemanticResults {
                results: match_courses(query, corpus.courses(), fuzzy),
                expanded_terms: vec![query.to_string()],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page position derived from `total`, `limit` and `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based.
    pub current: usize,
    pub total_pages: usize,
    pub limit: usize,
}

/// One entry of a rendered page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Current(usize),
    Ellipsis,
}

impl PageInfo {
    pub fn new(total: usize, limit: usize, offset: usize) -> Self {
        let limit = limit.max(1);
        Self {
            current: offset / limit + 1,
            total_pages: total.div_ceil(limit),
            limit,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Offset of the first item on `page` (1-based).
    pub fn offset_of(&self, page: usize) -> usize {
        page.saturating_sub(1) * self.limit
    }

    /// Page selector: first and last page, the current page ±2, and an
    /// ellipsis at ±3.
    pub fn window(&self) -> Vec<PageSlot> {
        let current = self.current;
        (1..=self.total_pages)
            .filter_map(|page| {
                if page == current {
                    Some(PageSlot::Current(page))
                } else if page == 1 || page == self.total_pages || page.abs_diff(current) <= 2 {
                    Some(PageSlot::Page(page))
                } else if page.abs_diff(current) == 3 {
                    Some(PageSlot::Ellipsis)
                } else {
                    None
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::types::Course;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn corpus(titles: &[&str]) -> Arc<Corpus> {
        let courses = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Course {
                id: i as u64 + 1,
                title: title.to_string(),
                keywords: String::new(),
                description: String::new(),
                level: String::new(),
                duration: 0,
                teacher: String::new(),
                category: String::new(),
            })
            .collect();
        Arc::new(Corpus::new(courses).unwrap())
    }

    struct CountingProvider {
        inner: Arc<Corpus>,
        calls: Cell<usize>,
    }

    impl CorpusProvider for CountingProvider {
        fn corpus(&self) -> Result<Arc<Corpus>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.corpus()
        }
    }

    struct FailingProvider;

    impl CorpusProvider for FailingProvider {
        fn corpus(&self) -> Result<Arc<Corpus>> {
            Err(SearchError::data_unavailable("file not found"))
        }
    }

    #[test]
    fn empty_query_short_circuits() {
        let provider = CountingProvider { inner: corpus(&["冥想"]), calls: Cell::new(0) };
        let response = SearchEngine::default()
            .execute(&SearchRequest::new("   "), &provider)
            .unwrap();
        assert_eq!(provider.calls.get(), 0);
        assert_eq!(response.total, 0);
        assert_eq!(response.query, "");
        assert!(response.fuzzy);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total": 0, "items": [], "query": "", "semantic": false, "fuzzy": true})
        );
    }

    #[test]
    fn empty_query_never_fails_even_without_data() {
        let response = SearchEngine::default().execute(&SearchRequest::new(""), &FailingProvider);
        assert!(response.is_ok());
    }

    #[test]
    fn provider_errors_propagate() {
        let err = SearchEngine::default()
            .execute(&SearchRequest::new("冥想"), &FailingProvider)
            .unwrap_err();
        assert!(matches!(err, SearchError::DataUnavailable { .. }));
    }

    #[test]
    fn query_is_trimmed() {
        let response = SearchEngine::default()
            .execute(&SearchRequest::new("  冥想 "), &corpus(&["冥想入门"]))
            .unwrap();
        assert_eq!(response.query, "冥想");
        assert_eq!(response.total, 1);
    }

    #[test]
    fn basic_mode_omits_expanded_terms() {
        let response = SearchEngine::default()
            .execute(&SearchRequest::new("冥想"), &corpus(&["冥想入门"]))
            .unwrap();
        assert_eq!(response.expanded_terms, None);
        assert_eq!(response.limit, Some(20));
        assert_eq!(response.offset, Some(0));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("expandedTerms").is_none());
    }

    #[test]
    fn semantic_mode_reports_expanded_terms() {
        let response = SearchEngine::default()
            .execute(&SearchRequest::new("呼吸").semantic(true), &corpus(&["呼吸法入门"]))
            .unwrap();
        assert_eq!(
            response.expanded_terms.as_deref(),
            Some(&["呼吸", "呼吸法", "气息", "吸气", "呼气", "呼吸节奏"].map(String::from)[..])
        );
    }

    #[test]
    fn pagination_slices_but_total_counts_everything() {
        let titles: Vec<String> = (0..25).map(|i| format!("冥想 {i}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        let provider = corpus(&titles);
        let engine = SearchEngine::default();

        let page = engine.execute(&SearchRequest::new("冥想").page(10, 20), &provider).unwrap();
        assert_eq!(page.total, 25);
        let ids: Vec<u64> = page.items.iter().map(ScoredCourse::id).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);

        let past_end = engine.execute(&SearchRequest::new("冥想").page(10, 40), &provider).unwrap();
        assert_eq!(past_end.total, 25);
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn page_info_math() {
        let info = PageInfo::new(25, 10, 20);
        assert_eq!(info.current, 3);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_prev());
        assert!(!info.has_next());
        assert_eq!(info.offset_of(2), 10);

        assert_eq!(PageInfo::new(0, 20, 0).total_pages, 0);
        assert_eq!(PageInfo::new(5, 0, 0).total_pages, 5);
    }

    #[test]
    fn page_window_elides_far_pages() {
        use PageSlot::*;
        let window = PageInfo::new(200, 10, 90).window();
        assert_eq!(
            window,
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Current(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20),
            ]
        );

        let near_start = PageInfo::new(50, 10, 0).window();
        assert_eq!(near_start, vec![Current(1), Page(2), Page(3), Ellipsis, Page(5)]);
    }
}
