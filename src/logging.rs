//! `tracing` subscriber setup for the binary.
//!
//! `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
//! `--debug`. The TUI owns the terminal, so it only logs to a file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const DEBUG_LOG_PATH: &str = "/tmp/zensearch-debug.log";

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }))
}

/// Log to stderr so stdout stays clean for command output.
pub fn init_stderr(debug: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter(debug))
        .init();
}

/// Append debug logs to `path` (tail -f to inspect).
pub fn init_file(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter(true))
        .init();
    tracing::info!(path = %path.display(), "zensearch debug log started");
    Ok(())
}
