//! # Storage Traits
//!
//! The storage port used by the domain layer. Every collection (users,
//! children, attendance) is an ordered list of records behind one
//! [`RecordStore`], so services can run against CSV files in production and an
//! in-memory fake in tests.

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// A record type that lives in its own flat file
pub trait CsvRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// File name inside the data directory
    const FILE_NAME: &'static str;

    /// Header row, in column order
    const HEADERS: &'static [&'static str];
}

/// Trait defining the interface for one ordered record collection
///
/// Records come back in insertion order. Implementations make no promises
/// about concurrent writers.
#[async_trait]
pub trait RecordStore<R>: Send + Sync
where
    R: Clone + Send + Sync + 'static,
{
    /// Create the backing collection (with its header) if it does not exist yet
    async fn initialize(&self) -> Result<()>;

    /// Read every record in stored order; a missing collection reads as empty
    async fn read_all(&self) -> Result<Vec<R>>;

    /// Append one record at the end
    async fn append(&self, record: &R) -> Result<()>;

    /// Replace the whole collection
    async fn rewrite(&self, records: &[R]) -> Result<()>;

    /// Apply `apply` to every record and persist the result if any call
    /// returned true. Returns the number of records changed.
    ///
    /// The default is a full scan followed by a rewrite; an indexed backend
    /// can override this without touching callers.
    async fn update_matching(
        &self,
        apply: &(dyn for<'a> Fn(&'a mut R) -> bool + Send + Sync),
    ) -> Result<usize> {
        let mut records = self.read_all().await?;
        let mut changed = 0;
        for record in records.iter_mut() {
            if apply(record) {
                changed += 1;
            }
        }

        if changed > 0 {
            self.rewrite(&records).await?;
        }

        Ok(changed)
    }
}
