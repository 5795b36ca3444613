//! HTTP API over the shared search core.
//!
//! | Route              | Handler                   |
//! |--------------------|---------------------------|
//! | `/api`, `/api/v1`  | [`handlers::info`]        |
//! | `/api/v1/search`   | [`handlers::search`]      |
//! | `/api/v1/suggest`  | [`handlers::suggest`]     |
//! | anything else      | 404 `Endpoint not found`  |
//!
//! Each route also answers with a trailing slash, so `/api/v1/search/` is the
//! same endpoint as `/api/v1/search`. Only `GET` is routed; other methods
//! answer 405. Every response carries
//! CORS headers, see [`cors`].

pub mod cors;
pub mod error;
pub mod handlers;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{middleware, Extension, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use zensearch_core::config::{Config, SearchConfig};
use zensearch_core::SearchEngine;
use zensearch_corpus::CorpusHandle;

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub corpus: CorpusHandle,
    pub engine: SearchEngine,
    /// Applied when a request leaves an option unset.
    pub defaults: SearchConfig,
    pub suggestion_limit: usize,
}

impl ApiState {
    pub fn new(corpus: CorpusHandle, engine: SearchEngine, config: &Config) -> Self {
        Self {
            corpus,
            engine,
            defaults: config.search.clone(),
            suggestion_limit: config.ui.suggestion_limit,
        }
    }
}

pub fn router(state: ApiState, cors_allow_origin: &str) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(cors_allow_origin)
        .with_context(|| format!("invalid cors_allow_origin {cors_allow_origin:?}"))?;

    let endpoints = [
        ("/api", get(handlers::info)),
        ("/api/v1", get(handlers::info)),
        ("/api/v1/search", get(handlers::search)),
        ("/api/v1/suggest", get(handlers::suggest)),
    ];
    let mut app = Router::new();
    for (path, method_router) in endpoints {
        let method_router = method_router.fallback(handlers::method_not_allowed);
        app = app
            .route(&format!("{path}/"), method_router.clone())
            .route(path, method_router);
    }

    Ok(app
        .fallback(handlers::not_found)
        .layer(Extension(Arc::new(state)))
        .layer(middleware::from_fn_with_state(origin, cors::cors)))
}

/// Serve `app` on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
