//! zensearch TUI: ratatui search client over the shared search core.

pub mod app;
pub mod event;
pub mod history;
pub mod theme;
pub mod widgets;

pub use app::App;

use history::History;
use zensearch_core::config::Config;
use zensearch_core::{CorpusProvider, SearchEngine};

/// Start the TUI against `provider`, with history from the user data dir.
///
/// An unreadable history file is logged and replaced by an in-memory
/// history for this session; it is never overwritten.
pub fn run(
    config: &Config,
    engine: SearchEngine,
    provider: Box<dyn CorpusProvider>,
) -> anyhow::Result<()> {
    let path = History::default_path();
    let history = History::load(&path, config.ui.history_size).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "search history unavailable");
        History::in_memory(config.ui.history_size)
    });
    App::new(config, engine, provider, history).run()
}
