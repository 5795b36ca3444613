//! zensearch-corpus: where the course catalog comes from.
//!
//! A [`CorpusSource`] loads a validated [`zensearch_core::Corpus`] from a
//! local JSON file, a plain-HTTP URL, or the sample catalog compiled into the
//! binary. [`load_with_fallback`] chains a primary source with the sample.
//! A [`CorpusHandle`] publishes the current snapshot to every reader and is
//! what the search facade consumes; [`spawn_file_watcher`] keeps it fresh
//! when the file changes on disk. [`convert`] turns the course spreadsheet
//! export into the JSON format the sources read.

pub mod convert;
pub mod error;
pub mod handle;
pub mod sample;
pub mod source;
pub mod watch;

pub use convert::{convert_csv, to_json};
pub use error::LoadError;
pub use handle::CorpusHandle;
pub use source::{load_with_fallback, CorpusSource, Loaded, Origin};
pub use watch::{spawn_file_watcher, WatchGuard};
