//! Corpus loading errors.
//!
//! Every failure to read or fetch the raw bytes collapses into
//! [`SearchError::DataUnavailable`] at the facade boundary; validation
//! failures keep their original classification.

use std::path::PathBuf;
use thiserror::Error;
use zensearch_core::SearchError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Invalid(#[from] SearchError),
}

impl LoadError {
    /// Whether the raw data could not be obtained or parsed at all, as
    /// opposed to parsing into something that is not a course list.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, LoadError::Invalid(SearchError::MalformedCorpus { .. }))
    }
}

impl From<LoadError> for SearchError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Invalid(inner) => inner,
            other => SearchError::data_unavailable(other),
        }
    }
}
