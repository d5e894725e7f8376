//! In-memory [`RecordStore`] used by domain tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::storage::traits::RecordStore;

/// Vec-backed store with the same ordering contract as the CSV store
#[derive(Clone)]
pub struct MemoryRecordStore<R> {
    records: Arc<Mutex<Vec<R>>>,
    initialized: Arc<Mutex<bool>>,
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            initialized: Arc::new(Mutex::new(false)),
        }
    }
}

impl<R: Clone> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `records`
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            initialized: Arc::new(Mutex::new(true)),
        }
    }

    /// Snapshot of the current contents
    pub fn snapshot(&self) -> Vec<R> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<R> RecordStore<R> for MemoryRecordStore<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn initialize(&self) -> Result<()> {
        *self.initialized.lock().unwrap_or_else(|e| e.into_inner()) = true;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<R>> {
        Ok(self.snapshot())
    }

    async fn append(&self, record: &R) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }

    async fn rewrite(&self, records: &[R]) -> Result<()> {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = records.to_vec();
        Ok(())
    }
}
