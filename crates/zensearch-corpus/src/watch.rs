//! Hot reload of a file-backed corpus.
//!
//! The parent directory is watched rather than the file itself so that
//! editors which save by writing a temporary file and renaming it over the
//! original are still picked up.

use crate::handle::CorpusHandle;
use crate::source::read_file;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Keeps the watcher alive. Dropping it stops reloading.
pub struct WatchGuard {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Reload `path` into `handle` whenever it changes.
///
/// Bursts of events within `debounce` collapse into one reload. A reload that
/// fails leaves the previous snapshot in place.
pub fn spawn_file_watcher(
    path: &Path,
    handle: CorpusHandle,
    debounce: Duration,
) -> anyhow::Result<WatchGuard> {
    let path = std::path::absolute(path)?;
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, rx) = mpsc::channel(64);
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.blocking_send(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    tracing::info!(path = %path.display(), "watching corpus file");

    let task = tokio::spawn(reload_loop(path, handle, rx, debounce));
    Ok(WatchGuard { _watcher: watcher, task })
}

async fn reload_loop(
    path: PathBuf,
    handle: CorpusHandle,
    mut rx: mpsc::Receiver<notify::Result<Event>>,
    debounce: Duration,
) {
    while let Some(res) = rx.recv().await {
        match res {
            Ok(event) if touches(&event, &path) => {}
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "file watcher error");
                continue;
            }
        }

        tokio::time::sleep(debounce).await;
        while rx.try_recv().is_ok() {}
        reload(&path, &handle).await;
    }
}

/// Read `path` and publish it. Returns whether the snapshot changed.
pub async fn reload(path: &Path, handle: &CorpusHandle) -> bool {
    match read_file(path).await {
        Ok(corpus) => {
            tracing::info!(path = %path.display(), courses = corpus.len(), "corpus reloaded");
            handle.publish(Arc::new(corpus));
            true
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "corpus reload failed, keeping previous snapshot");
            false
        }
    }
}

fn touches(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}
