//! Test utilities for the JSON storage backend.
//!
//! Provides an RAII environment whose temporary directory is removed when
//! the value drops, even if a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;

/// Temporary storage environment for tests.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed.
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}
