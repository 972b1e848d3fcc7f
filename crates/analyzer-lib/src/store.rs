//! In-process dataset storage
//!
//! A single process-wide slot holding the most recently ingested dataset
//! for later read-only queries. Writes swap the whole dataset at once
//! (last-write-wins); reads take an `Arc` snapshot and never observe a
//! partially updated list.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::ResourceRecord;

/// Cloneable handle to the shared dataset slot
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    slot: Arc<RwLock<Option<Arc<[ResourceRecord]>>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored dataset, returning the number of records stored
    pub async fn replace(&self, records: Vec<ResourceRecord>) -> usize {
        let dataset: Arc<[ResourceRecord]> = Arc::from(records);
        let count = dataset.len();
        *self.slot.write().await = Some(dataset);
        count
    }

    /// Atomic snapshot of the current dataset, if one has been ingested
    pub async fn snapshot(&self) -> Option<Arc<[ResourceRecord]>> {
        self.slot.read().await.clone()
    }

    /// Number of records currently stored (0 when nothing was ingested)
    pub async fn len(&self) -> usize {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|d| d.len())
            .unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
