//! Route handlers for the `/api` surface.

use super::error::ApiError;
use super::ApiState;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::Method;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use zensearch_core::search::suggest::{suggest as suggest_terms, Suggestion};
use zensearch_core::{SearchError, SearchRequest, SearchResponse};

pub const API_NAME: &str = "Meditation Search API";
pub const API_VERSION: &str = "v1";

/// Query string of `GET /api/v1/search`.
///
/// Flags are kept as text and read with [`parse_flag`]; `limit` and
/// `offset` must be non-negative integers.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub semantic: Option<String>,
    pub fuzzy: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

/// Lenient boolean: `0`, `false`, `no`, `off` and the empty string are
/// false, anything else is true. Absent means `default`.
pub fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => default,
        Some(v) => !matches!(v.as_str(), "" | "0" | "false" | "no" | "off"),
    }
}

pub async fn info() -> Json<Value> {
    Json(json!({
        "name": API_NAME,
        "version": API_VERSION,
        "endpoints": {
            "search": "/api/v1/search",
            "suggest": "/api/v1/suggest",
        },
    }))
}

pub async fn search(
    Extension(state): Extension<Arc<ApiState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let defaults = &state.defaults;
    let request = SearchRequest::new(params.q)
        .semantic(parse_flag(params.semantic.as_deref(), defaults.semantic))
        .fuzzy(parse_flag(params.fuzzy.as_deref(), defaults.fuzzy))
        .page(
            params.limit.unwrap_or(defaults.limit),
            params.offset.unwrap_or(0),
        );

    let response = state.engine.execute(&request, &state.corpus)?;
    Ok(Json(response))
}

pub async fn suggest(
    Extension(state): Extension<Arc<ApiState>>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let no_history: &[&str] = &[];
    Ok(Json(suggest_terms(
        params.q.trim(),
        no_history,
        state.engine.synonyms(),
        state.suggestion_limit,
    )))
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    SearchError::invalid_method(method.as_str()).into()
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
