use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// CsvConnection owns the data directory and makes sure each CSV file exists
/// with its header row
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at `base_directory`, creating the
    /// directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the path of a collection file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Ensure a CSV file exists with a header row; a missing or zero-byte
    /// file gets `headers` written. Returns true when the header was written.
    pub fn ensure_file_exists(&self, file_name: &str, headers: &[&str]) -> Result<bool> {
        let file_path = self.file_path(file_name);

        if file_path.exists() {
            let len = fs::metadata(&file_path)
                .with_context(|| format!("Failed to stat {}", file_path.display()))?
                .len();
            if len > 0 {
                return Ok(false);
            }
            warn!("{} is empty, writing header", file_path.display());
        }

        let mut writer = csv::Writer::from_path(&file_path)
            .with_context(|| format!("Failed to create {}", file_path.display()))?;
        writer.write_record(headers)?;
        writer.flush()?;

        info!("Created {} with header", file_path.display());
        Ok(true)
    }
}
