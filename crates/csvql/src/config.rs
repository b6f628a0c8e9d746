//! Store location configuration.
//!
//! The data directory is passed around as an explicit value; nothing in the
//! engine reads ambient process state.

use std::path::{Path, PathBuf};

/// Name of the catalog document inside the data directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Where the catalog and table files live.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The data directory.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Creates a configuration rooted at the given directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the catalog document.
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(METADATA_FILE)
    }

    /// Path of a table file, relative paths resolved against the data
    /// directory.
    #[must_use]
    pub fn table_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(file)
    }
}
