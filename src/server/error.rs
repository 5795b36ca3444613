//! JSON error responses: `{"error": true, "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use zensearch_core::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Invalid query string: {0}")]
    BadRequest(String),
    #[error("Endpoint not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Search(SearchError::InvalidMethod { .. }) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "error": true, "message": self.to_string() }))).into_response()
    }
}
