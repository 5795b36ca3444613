//! Persistent search history.
//!
//! Entries are kept oldest first. Searching a query again moves it to the
//! end, and only the newest `capacity` entries survive. The list is stored
//! as JSON under `$XDG_DATA_HOME/zensearch/history.json`.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub searched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    /// `None` keeps the history in memory only.
    path: Option<PathBuf>,
}

impl History {
    pub fn in_memory(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity, path: None }
    }

    /// Load history from `path`. A missing file is an empty history.
    pub fn load(path: &Path, capacity: usize) -> anyhow::Result<Self> {
        let mut entries: Vec<HistoryEntry> = match std::fs::read_to_string(path) {
            Ok(src) => serde_json::from_str(&src)
                .with_context(|| format!("parsing history file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("reading history file {}", path.display()))
            }
        };
        let excess = entries.len().saturating_sub(capacity);
        entries.drain(..excess);
        tracing::debug!(path = %path.display(), entries = entries.len(), "history loaded");
        Ok(Self { entries, capacity, path: Some(path.to_path_buf()) })
    }

    /// `$XDG_DATA_HOME/zensearch/history.json`, or `~/.local/share/...`.
    pub fn default_path() -> PathBuf {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                    .join(".local")
                    .join("share")
            })
            .join("zensearch")
            .join("history.json")
    }

    /// Record a search. Blank queries are ignored.
    pub fn record(&mut self, query: &str, at: DateTime<Utc>) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|e| e.query != query);
        self.entries.push(HistoryEntry { query: query.to_string(), searched_at: at });
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess);
    }

    /// Write the history back to its file, if it has one.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// The newest `n` entries, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(n)
    }

    /// All queries, oldest first.
    pub fn queries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.query.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
