//! zensearch-core: course catalog search core.
//!
//! This crate holds everything both callers (the HTTP service and the
//! terminal client) share: the course data model, the error taxonomy, the
//! configuration layer, and the search pipeline itself.
//!
//! # Pipeline
//!
//! ```text
//!                ┌──────────── semantic = false ────────────┐
//! SearchRequest ─┤                                          ├─► ranked list ─► page
//!                └─► expand ─► match per term ─► merge ─────┘
//! ```
//!
//! Every query is a linear scan over an immutable [`Corpus`]; there is no
//! index and no shared mutable state.

pub mod config;
pub mod error;
pub mod search;
pub mod types;

pub use error::{Result, SearchError};
pub use search::facade::{
    CorpusProvider, PageInfo, SearchEngine, SearchRequest, SearchResponse,
};
pub use search::synonyms::SynonymTable;
pub use types::{Corpus, Course, MatchField, MatchTag, ScoredCourse};
