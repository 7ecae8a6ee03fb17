use anyhow::Result;
use log::debug;

use super::connection::JsonConnection;
use crate::storage::traits::EmployerStorage;

/// Storage key shared with the original web tracker.
const EMPLOYERS_KEY: &str = "freelance_employers";

/// JSON-file-backed employer repository.
#[derive(Debug, Clone)]
pub struct EmployerRepository {
    connection: JsonConnection,
}

impl EmployerRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl EmployerStorage for EmployerRepository {
    fn load_employers(&self) -> Result<Option<Vec<String>>> {
        let employers: Option<Vec<String>> = self.connection.read_json_file(EMPLOYERS_KEY)?;
        if let Some(list) = &employers {
            debug!("Loaded {} employers", list.len());
        }
        Ok(employers)
    }

    fn save_employers(&self, employers: &[String]) -> Result<()> {
        self.connection.write_json_file(EMPLOYERS_KEY, &employers)?;
        debug!("Saved {} employers", employers.len());
        Ok(())
    }
}
