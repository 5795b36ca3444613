//! Error taxonomy shared by every zensearch layer.
//!
//! All variants are terminal for the current request. The core never retries;
//! callers decide whether to surface the message or fall back to another
//! corpus. An empty query is not an error.

use thiserror::Error;

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Anything other than a read was attempted against the search API.
    #[error("Method not allowed: {method}")]
    InvalidMethod { method: String },

    /// The corpus could not be fetched or is not valid JSON.
    #[error("Course data unavailable: {reason}")]
    DataUnavailable { reason: String },

    /// The corpus parsed but does not describe a list of courses.
    #[error("Malformed course data: {reason}")]
    MalformedCorpus { reason: String },
}

impl SearchError {
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod { method: method.into() }
    }

    pub fn data_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable { reason: reason.to_string() }
    }

    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedCorpus { reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            SearchError::invalid_method("POST").to_string(),
            "Method not allowed: POST"
        );
        assert_eq!(
            SearchError::data_unavailable("file not found").to_string(),
            "Course data unavailable: file not found"
        );
        assert!(SearchError::malformed("duplicate id 3")
            .to_string()
            .ends_with("duplicate id 3"));
    }
}
