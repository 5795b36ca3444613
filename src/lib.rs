//! zensearch: keyword and synonym-expanded search over a meditation course
//! catalog.
//!
//! The search itself lives in `zensearch-core`; corpus loading and hot
//! reload in `zensearch-corpus`; the terminal client in `zensearch-tui`.
//! This crate wires them together behind a CLI and an HTTP API.
//!
//! ```text
//! CorpusSource ──► CorpusHandle ──┬──► server (axum)
//!        ▲                        ├──► search (one-shot CLI)
//!   file watcher                  └──► tui
//! ```

pub mod cli;
pub mod logging;
pub mod server;
