//! Test utilities for CSV-backed tests
//!
//! [`TestEnvironment`] owns a temporary data directory that is removed when it
//! goes out of scope, even if the test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

/// RAII test environment around a temporary data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        Self::new_with_prefix("attendance_test").await
    }

    /// Create a test environment with a custom directory prefix for debugging
    pub async fn new_with_prefix(prefix: &str) -> Result<Self> {
        let temp_dir = TempDir::with_prefix(prefix)?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Raw contents of a file in the data directory, empty if missing
    pub fn read_file(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.base_path.join(file_name)).unwrap_or_default()
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("ATTENDANCE_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
