//! # CSV Record Store
//!
//! File-backed [`RecordStore`] implementation. Each record type owns one CSV
//! file in the data directory:
//!
//! ```text
//! data/
//! ├── users.csv        ID,Email,PasswordHash,Gender,Role
//! ├── children.csv     ParentID,ChildName,Gender
//! └── attendance.csv   ID,Timestamp,ChildName
//! ```
//!
//! Appends open the file in append mode; rewrites go through a temp file that
//! is renamed over the original. Nothing here guards against two processes
//! writing the same file at once.
//!
//! Rows that fail to parse are logged and skipped by `read_all`, so one bad
//! line cannot lock every user out. Keyed updates read strictly instead: a
//! rewrite would otherwise drop the unreadable rows.

use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::storage::traits::{CsvRecord, RecordStore};

/// CSV-based store for one record type
pub struct CsvRecordStore<R> {
    connection: CsvConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for CsvRecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: CsvRecord> CsvRecordStore<R> {
    /// Create a new store for `R` under the connection's data directory
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            _record: PhantomData,
        }
    }

    /// Path of the backing CSV file
    pub fn file_path(&self) -> PathBuf {
        self.connection.file_path(R::FILE_NAME)
    }

    /// Load every row. With `strict`, the first malformed row is an error;
    /// otherwise it is logged with its line number and skipped.
    fn read_records(&self, strict: bool) -> Result<Vec<R>> {
        let csv_path = self.file_path();

        if !csv_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&csv_path)
            .with_context(|| format!("Failed to open {}", csv_path.display()))?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    let line = e.position().map(|pos| pos.line()).unwrap_or_default();
                    if strict {
                        return Err(e).with_context(|| {
                            format!("Malformed row at line {} in {}", line, csv_path.display())
                        });
                    }
                    warn!(
                        "Skipping malformed row at line {} in {}: {}",
                        line,
                        csv_path.display(),
                        e
                    );
                }
            }
        }

        debug!("Read {} records from {:?}", records.len(), csv_path);
        Ok(records)
    }
}

#[async_trait]
impl<R: CsvRecord> RecordStore<R> for CsvRecordStore<R> {
    async fn initialize(&self) -> Result<()> {
        self.connection.ensure_file_exists(R::FILE_NAME, R::HEADERS)?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<R>> {
        self.read_records(false)
    }

    async fn append(&self, record: &R) -> Result<()> {
        self.connection.ensure_file_exists(R::FILE_NAME, R::HEADERS)?;
        let csv_path = self.file_path();

        let file = OpenOptions::new()
            .append(true)
            .open(&csv_path)
            .with_context(|| format!("Failed to open {} for append", csv_path.display()))?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.serialize(record)?;
        writer.flush()?;

        debug!("Appended record to {:?}", csv_path);
        Ok(())
    }

    async fn rewrite(&self, records: &[R]) -> Result<()> {
        let csv_path = self.file_path();
        let temp_path = csv_path.with_extension("tmp");

        {
            let file = File::create(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(file));
            writer.write_record(R::HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &csv_path)
            .with_context(|| format!("Failed to replace {}", csv_path.display()))?;

        debug!("Rewrote {:?} with {} records", csv_path, records.len());
        Ok(())
    }

    async fn update_matching(
        &self,
        apply: &(dyn for<'a> Fn(&'a mut R) -> bool + Send + Sync),
    ) -> Result<usize> {
        let mut records = self.read_records(true)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct NoteRecord {
        #[serde(rename = "Key")]
        key: String,
        #[serde(rename = "Text")]
        text: String,
    }

    impl CsvRecord for NoteRecord {
        const FILE_NAME: &'static str = "notes.csv";
        const HEADERS: &'static [&'static str] = &["Key", "Text"];
    }

    fn note(key: &str, text: &str) -> NoteRecord {
        NoteRecord {
            key: key.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_read_all_on_missing_file_is_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        let records = store.read_all().await.expect("Failed to read");
        assert!(records.is_empty());
        assert_eq!(store.file_path(), env.base_directory().join("notes.csv"));
        assert!(!store.file_path().exists());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        store.initialize().await.unwrap();
        store.append(&note("a", "first")).await.unwrap();
        store.initialize().await.unwrap();

        assert_eq!(env.read_file("notes.csv"), "Key,Text\na,first\n");
    }

    #[tokio::test]
    async fn test_append_keeps_file_order() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        store.append(&note("b", "second")).await.unwrap();
        store.append(&note("a", "first")).await.unwrap();
        store.append(&note("c", "third, with a comma")).await.unwrap();

        let records = store.read_all().await.unwrap();
        assert_eq!(
            records,
            vec![
                note("b", "second"),
                note("a", "first"),
                note("c", "third, with a comma"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rewrite_replaces_collection() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        store.append(&note("a", "old")).await.unwrap();
        store.append(&note("b", "old")).await.unwrap();

        store
            .rewrite(&[note("a", "new"), note("b", "old")])
            .await
            .unwrap();

        assert_eq!(env.read_file("notes.csv"), "Key,Text\na,new\nb,old\n");
        assert!(!store.file_path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_update_matching_only_rewrites_on_change() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        store.append(&note("a", "one")).await.unwrap();
        store.append(&note("b", "two")).await.unwrap();

        let changed = store
            .update_matching(&|record: &mut NoteRecord| {
                if record.key == "b" {
                    record.text = "deux".to_string();
                    true
                } else {
                    false
                }
            })
            .await
            .unwrap();
        assert_eq!(changed, 1);

        let unchanged = store
            .update_matching(&|record: &mut NoteRecord| record.key == "zzz")
            .await
            .unwrap();
        assert_eq!(unchanged, 0);

        let records = store.read_all().await.unwrap();
        assert_eq!(records, vec![note("a", "one"), note("b", "deux")]);
    }

    #[tokio::test]
    async fn test_append_to_empty_file_writes_header_first() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());
        fs::write(store.file_path(), "").unwrap();

        store.append(&note("a", "first")).await.unwrap();

        assert_eq!(env.read_file("notes.csv"), "Key,Text\na,first\n");
        assert_eq!(store.read_all().await.unwrap(), vec![note("a", "first")]);
    }

    #[tokio::test]
    async fn test_malformed_row_is_skipped_on_read() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());

        fs::write(store.file_path(), "Key,Text\na,first\nonly-one-field\nb,second\n").unwrap();

        let records = store.read_all().await.unwrap();
        assert_eq!(records, vec![note("a", "first"), note("b", "second")]);
    }

    #[tokio::test]
    async fn test_update_refuses_to_drop_malformed_rows() {
        let env = TestEnvironment::new().await.unwrap();
        let store: CsvRecordStore<NoteRecord> = CsvRecordStore::new(env.connection.clone());
        let content = "Key,Text\na,first\nonly-one-field\n";
        fs::write(store.file_path(), content).unwrap();

        let result = store
            .update_matching(&|record: &mut NoteRecord| {
                record.text = "changed".to_string();
                true
            })
            .await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Malformed row at line"), "{}", message);
        assert_eq!(env.read_file("notes.csv"), content);
    }
}
