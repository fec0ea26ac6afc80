//! Search history persistence
//!
//! Completed searches are handed to a background worker over a bounded
//! channel and appended to a [`HistoryStore`]. Recording never blocks or
//! fails the search that produced it.

use crate::config::HistorySettings;
use crate::results::ContentCategory;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One completed search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: Uuid,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub results_count: usize,
    pub content_types: Vec<ContentCategory>,
}

impl SearchRecord {
    pub fn new(query: &str, results_count: usize, content_types: &[ContentCategory]) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            timestamp: Utc::now(),
            results_count,
            content_types: content_types.to_vec(),
        }
    }
}

/// Write-only sink for search records
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, record: &SearchRecord) -> anyhow::Result<()>;
}

/// Appends one JSON object per line to a file
#[derive(Debug, Clone)]
pub struct JsonlHistoryStore {
    path: PathBuf,
}

impl JsonlHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    async fn record(&self, record: &SearchRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHistoryStore;

#[async_trait]
impl HistoryStore for NoopHistoryStore {
    async fn record(&self, _record: &SearchRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Handle used by the search path to queue records
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    tx: mpsc::Sender<SearchRecord>,
}

impl HistoryRecorder {
    /// Start a worker draining into `store`.
    ///
    /// The worker exits once every recorder clone has been dropped.
    pub fn spawn(store: Arc<dyn HistoryStore>, queue_size: usize) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<SearchRecord>(queue_size.max(1));

        let handle = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                if let Err(e) = store.record(&record).await {
                    warn!("Failed to record search history: {}", e);
                } else {
                    debug!("Recorded search '{}'", record.query);
                }
            }
        });

        (Self { tx }, handle)
    }

    /// Build a recorder from settings, or `None` when history is disabled
    pub fn from_settings(settings: &HistorySettings) -> Option<Self> {
        if !settings.enabled {
            info!("Search history disabled");
            return None;
        }

        let path = settings.resolved_path();
        info!("Recording search history to {}", path.display());
        let store: Arc<dyn HistoryStore> = Arc::new(JsonlHistoryStore::new(path));

        let (recorder, _worker) = Self::spawn(store, settings.queue_size);
        Some(recorder)
    }

    /// Queue a record without waiting
    pub fn record(&self, record: SearchRecord) {
        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                warn!("History queue full; dropping record for '{}'", record.query)
            }
            Err(TrySendError::Closed(record)) => {
                warn!("History worker stopped; dropping record for '{}'", record.query)
            }
        }
    }
}
