//! JSON storage connection.
//!
//! The web tracker kept its state in three localStorage keys; this backend
//! maps each key to one JSON file in a data directory:
//!
//! ```text
//! data/
//! ├── freelance_orders.json
//! ├── freelance_employers.json
//! └── collapsed_sections.json
//! ```
//!
//! A user-scoped connection prefixes every file name with
//! `user_<sanitized-login>_`, which is how the authenticated variant of the
//! tracker namespaced its keys. Both variants are plain values of the same
//! type, selected at construction.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::storage::json::employer_repository::EmployerRepository;
use crate::storage::json::order_repository::OrderRepository;
use crate::storage::json::view_state_repository::ViewStateRepository;
use crate::storage::traits::Connection;

/// Connection to a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    key_prefix: Option<String>,
}

impl JsonConnection {
    /// Open a plain (single-user) connection, creating the directory if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        fs::create_dir_all(&base_directory)
            .with_context(|| format!("Failed to create data directory {:?}", base_directory))?;
        info!("Opened JSON storage at {:?}", base_directory);
        Ok(Self {
            base_directory,
            key_prefix: None,
        })
    }

    /// Open a user-scoped connection whose files are prefixed per login.
    pub fn for_user<P: AsRef<Path>>(base_directory: P, user_login: &str) -> Result<Self> {
        let mut connection = Self::new(base_directory)?;
        let prefix = format!("user_{}_", Self::sanitize_user_key(user_login));
        info!("Scoping JSON storage with key prefix '{}'", prefix);
        connection.key_prefix = Some(prefix);
        Ok(connection)
    }

    /// Reduce a login (usually an email) to a filesystem-safe key.
    fn sanitize_user_key(user_login: &str) -> String {
        user_login
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Full path of the file backing a storage key.
    pub(crate) fn file_path(&self, key: &str) -> PathBuf {
        let file_name = match &self.key_prefix {
            Some(prefix) => format!("{}{}.json", prefix, key),
            None => format!("{}.json", key),
        };
        self.base_directory.join(file_name)
    }

    /// Read and deserialize the file for `key`; `None` when it doesn't exist.
    pub(crate) fn read_json_file<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.file_path(key);
        if !path.exists() {
            debug!("No file for key '{}' at {:?}", key, path);
            return Ok(None);
        }

        let file =
            File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt JSON in {:?}", path))?;
        Ok(Some(value))
    }

    /// Serialize and write the file for `key`. Writes go through a temp file
    /// and a rename so a crash mid-write cannot corrupt the previous data.
    pub(crate) fn write_json_file<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("json.tmp");

        {
            let file = File::create(&tmp_path)
                .with_context(|| format!("Failed to create {:?}", tmp_path))?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, value)
                .with_context(|| format!("Failed to serialize data for key '{}'", key))?;
        }

        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to move {:?} into place", tmp_path))?;
        debug!("Wrote key '{}' to {:?}", key, path);
        Ok(())
    }
}

impl Connection for JsonConnection {
    type OrderRepository = OrderRepository;
    type EmployerRepository = EmployerRepository;
    type ViewStateRepository = ViewStateRepository;

    fn create_order_repository(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }

    fn create_employer_repository(&self) -> EmployerRepository {
        EmployerRepository::new(self.clone())
    }

    fn create_view_state_repository(&self) -> ViewStateRepository {
        ViewStateRepository::new(self.clone())
    }
}
