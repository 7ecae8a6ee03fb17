use anyhow::Result;
use log::debug;
use std::collections::HashMap;

use super::connection::JsonConnection;
use crate::storage::traits::ViewStateStorage;

const COLLAPSED_SECTIONS_KEY: &str = "collapsed_sections";

/// JSON-file-backed collapsed-section cache.
///
/// Keys are never validated against the current employer list; stale entries
/// simply stop matching any section and are ignored.
#[derive(Debug, Clone)]
pub struct ViewStateRepository {
    connection: JsonConnection,
}

impl ViewStateRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ViewStateStorage for ViewStateRepository {
    fn load_collapsed_sections(&self) -> Result<HashMap<String, bool>> {
        let sections: HashMap<String, bool> = self
            .connection
            .read_json_file(COLLAPSED_SECTIONS_KEY)?
            .unwrap_or_default();
        debug!("Loaded {} collapsed-section flags", sections.len());
        Ok(sections)
    }

    fn save_collapsed_sections(&self, sections: &HashMap<String, bool>) -> Result<()> {
        self.connection
            .write_json_file(COLLAPSED_SECTIONS_KEY, sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_when_never_saved() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo = ViewStateRepository::new(JsonConnection::new(temp_dir.path()).unwrap());
        assert!(repo.load_collapsed_sections().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_keeps_stale_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo = ViewStateRepository::new(JsonConnection::new(temp_dir.path()).unwrap());

        let mut sections = HashMap::new();
        sections.insert("writers-admin".to_string(), true);
        sections.insert("employer-Long Gone Ltd".to_string(), true);
        repo.save_collapsed_sections(&sections).unwrap();

        let loaded = repo.load_collapsed_sections().unwrap();
        assert_eq!(loaded, sections);
    }
}
