//! The sample catalog compiled into the binary.
//!
//! Served when the configured corpus is unavailable and
//! `corpus.fallback_to_sample` is on, and used by tests and benchmarks.

use std::sync::{Arc, LazyLock};
use zensearch_core::Corpus;

pub const SAMPLE_JSON: &str = include_str!("../data/sample_courses.json");

static SAMPLE: LazyLock<Arc<Corpus>> = LazyLock::new(|| {
    Arc::new(Corpus::from_json_str(SAMPLE_JSON).expect("embedded sample catalog must be valid"))
});

/// Shared handle to the parsed sample catalog.
pub fn sample_corpus() -> Arc<Corpus> {
    Arc::clone(&SAMPLE)
}
