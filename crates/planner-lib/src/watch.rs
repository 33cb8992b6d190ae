//! Debounced payload recalculation
//!
//! Watches a payload sample on disk and re-measures it once edits settle.
//! A burst of change events collapses into a single update after the quiet
//! period; each update is an independent measurement, so skipping or
//! repeating one never changes a result.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::payload::measure_payload_bytes;

/// Quiet period before a burst of edits triggers a recalculation
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single-shot debounce timer; every trigger restarts the countdown
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event at `now`, pushing the deadline back
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether the quiet period has elapsed; consumes the pending fire
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// A fresh measurement of the watched sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadUpdate {
    pub path: PathBuf,
    pub payload_bytes: u64,
}

/// Read a payload sample from disk and measure it
pub async fn measure_file(path: &Path) -> Result<u64> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read payload sample {}", path.display()))?;
    Ok(measure_payload_bytes(&text))
}

/// Watches one payload file for edits
pub struct PayloadWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl PayloadWatcher {
    pub fn new(path: impl Into<PathBuf>, debounce: Duration) -> Self {
        Self {
            path: path.into(),
            debounce,
        }
    }

    /// Start watching; updates are sent on `update_tx`.
    /// Returns a handle that stops watching when dropped.
    pub async fn start(self, update_tx: mpsc::Sender<PayloadUpdate>) -> Result<WatcherHandle> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .with_context(|| format!("Not a file path: {}", self.path.display()))?;

        // Editors often replace the file instead of writing in place, so the
        // parent directory is watched and events are filtered by name.
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = event_tx.send(event);
                }
            },
            notify::Config::default(),
        )
        .context("Failed to create filesystem watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        info!(path = %self.path.display(), debounce_ms = self.debounce.as_millis() as u64, "Watching payload sample");

        let path = self.path;
        let mut debouncer = Debouncer::new(self.debounce);

        let handle = tokio::spawn(async move {
            loop {
                let deadline = debouncer.deadline();
                tokio::select! {
                    maybe_event = event_rx.recv() => match maybe_event {
                        Some(event) => {
                            if is_relevant(&event, &file_name) {
                                debouncer.trigger(Instant::now());
                            }
                        }
                        None => {
                            debug!("Watcher channel closed");
                            break;
                        }
                    },
                    _ = sleep_until(deadline) => {
                        if !debouncer.ready(Instant::now()) {
                            continue;
                        }
                        match measure_file(&path).await {
                            Ok(payload_bytes) => {
                                let update = PayloadUpdate { path: path.clone(), payload_bytes };
                                if update_tx.send(update).await.is_err() {
                                    debug!("Update receiver dropped, stopping watcher");
                                    break;
                                }
                            }
                            Err(e) => warn!(error = %e, "Skipping recalculation"),
                        }
                    }
                }
            }
        });

        Ok(WatcherHandle {
            _watcher: watcher,
            task: handle,
        })
    }
}

/// Keeps the filesystem watcher alive
pub struct WatcherHandle {
    _watcher: RecommendedWatcher,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn is_relevant(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
