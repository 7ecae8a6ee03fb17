//! Backup and restore for the whole ledger.
//!
//! The artifact is a single JSON document carrying orders, employers and
//! collapsed-section flags plus an export timestamp. Restore validates the
//! document before touching anything and then replaces the store contents
//! wholesale; it is never a merge.

use anyhow::Context;
use chrono::Utc;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::commands::orders::RestoreSummary;
use crate::domain::errors::{LedgerError, Result};
use crate::domain::models::views::BackupData;
use crate::domain::order_service::OrderService;
use crate::storage::traits::{Connection, ViewStateStorage};

/// Export/restore orchestration.
#[derive(Debug, Clone, Default)]
pub struct BackupService;

impl BackupService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the backup artifact from the current store contents and
    /// persisted view state.
    pub fn build_backup<C: Connection>(
        &self,
        order_service: &OrderService<C>,
        view_state: &impl ViewStateStorage,
    ) -> Result<BackupData> {
        let backup = BackupData {
            orders: order_service.list_orders(),
            employers: order_service.list_employers(),
            collapsed_sections: view_state.load_collapsed_sections()?,
            export_date: Utc::now().to_rfc3339(),
        };
        info!(
            "Built backup with {} orders and {} employers",
            backup.orders.len(),
            backup.employers.len()
        );
        Ok(backup)
    }

    /// Serialize the backup artifact as pretty-printed JSON.
    pub fn export_json<C: Connection>(
        &self,
        order_service: &OrderService<C>,
        view_state: &impl ViewStateStorage,
    ) -> Result<String> {
        let backup = self.build_backup(order_service, view_state)?;
        let json = serde_json::to_string_pretty(&backup)
            .context("Failed to serialize backup")?;
        Ok(json)
    }

    /// File name for a backup taken now: `freelance-backup-YYYY-MM-DD.json`.
    pub fn backup_file_name(&self) -> String {
        format!("freelance-backup-{}.json", Utc::now().format("%Y-%m-%d"))
    }

    /// Write the backup to `custom_dir`, or to the Documents folder (home
    /// directory as fallback) when none is given. Returns the written path.
    pub fn export_to_path<C: Connection>(
        &self,
        order_service: &OrderService<C>,
        view_state: &impl ViewStateStorage,
        custom_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        let json = self.export_json(order_service, view_state)?;

        let export_dir = match custom_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| {
                    error!("Could not determine a default export directory");
                    LedgerError::Storage(anyhow::anyhow!(
                        "no default export directory available"
                    ))
                })?,
        };

        fs::create_dir_all(&export_dir)
            .with_context(|| format!("Failed to create export directory {:?}", export_dir))?;
        let file_path = export_dir.join(self.backup_file_name());
        fs::write(&file_path, json)
            .with_context(|| format!("Failed to write backup file {:?}", file_path))?;

        info!("Exported backup to {:?}", file_path);
        Ok(file_path)
    }

    /// Validate and restore a backup document, replacing the store contents
    /// and collapsed-section state wholesale.
    pub fn restore_from_json<C: Connection>(
        &self,
        json: &str,
        order_service: &OrderService<C>,
        view_state: &impl ViewStateStorage,
    ) -> Result<RestoreSummary> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| LedgerError::Format(format!("not valid JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| LedgerError::Format("backup must be a JSON object".to_string()))?;
        for required_key in ["orders", "employers"] {
            if !object.contains_key(required_key) {
                return Err(LedgerError::Format(format!(
                    "missing required key '{}'",
                    required_key
                )));
            }
        }

        let backup: BackupData = serde_json::from_value(value)
            .map_err(|e| LedgerError::Format(format!("unreadable backup contents: {}", e)))?;

        let summary = order_service.replace_all(backup.orders, backup.employers)?;
        view_state.save_collapsed_sections(&backup.collapsed_sections)?;

        info!(
            "Restored {} orders and {} employers from backup dated {}",
            summary.restored_orders, summary.restored_employers, backup.export_date
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::orders::CreateOrderCommand;
    use crate::domain::models::order::WorkCategory;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::json::JsonConnection;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn setup() -> (
        TestEnvironment,
        OrderService<JsonConnection>,
        crate::storage::json::ViewStateRepository,
    ) {
        let env = TestEnvironment::new().unwrap();
        let service = OrderService::new(Arc::new(env.connection.clone())).unwrap();
        let view_state = env.connection.create_view_state_repository();
        (env, service, view_state)
    }

    fn sample_command() -> CreateOrderCommand {
        CreateOrderCommand {
            category: WorkCategory::Employer,
            employer_name: Some("Acme".to_string()),
            title: "Website content".to_string(),
            date_assigned: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            pages: 2,
            amount: 1000.0,
            status: None,
            payment: None,
        }
    }

    #[test]
    fn test_backup_restore_round_trip_is_wholesale() {
        let (_env, service, view_state) = setup();
        service.create_order(sample_command()).unwrap();

        let mut collapsed = HashMap::new();
        collapsed.insert("employer-Acme".to_string(), true);
        view_state.save_collapsed_sections(&collapsed).unwrap();

        let backup_service = BackupService::new();
        let json = backup_service.export_json(&service, &view_state).unwrap();

        // A second environment restores to exactly the exported contents.
        let (_env2, other_service, other_view_state) = setup();
        other_service
            .create_order(CreateOrderCommand {
                title: "To be replaced".to_string(),
                ..sample_command()
            })
            .unwrap();

        let summary = backup_service
            .restore_from_json(&json, &other_service, &other_view_state)
            .unwrap();
        assert_eq!(summary.restored_orders, 1);

        let orders = other_service.list_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].title, "Website content");
        assert!(other_view_state
            .load_collapsed_sections()
            .unwrap()
            .get("employer-Acme")
            .copied()
            .unwrap_or(false));
    }

    #[test]
    fn test_restore_rejects_missing_keys() {
        let (_env, service, view_state) = setup();
        let backup_service = BackupService::new();

        let err = backup_service
            .restore_from_json(r#"{"orders": []}"#, &service, &view_state)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Format(_)));

        let err = backup_service
            .restore_from_json(r#"{"employers": []}"#, &service, &view_state)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Format(_)));
    }

    #[test]
    fn test_restore_rejects_invalid_json() {
        let (_env, service, view_state) = setup();
        let err = BackupService::new()
            .restore_from_json("definitely not json", &service, &view_state)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Format(_)));
    }

    #[test]
    fn test_restore_failure_leaves_store_unchanged() {
        let (_env, service, view_state) = setup();
        service.create_order(sample_command()).unwrap();

        let result = BackupService::new().restore_from_json(
            r#"{"wrong": true}"#,
            &service,
            &view_state,
        );
        assert!(result.is_err());
        assert_eq!(service.list_orders().len(), 1);
    }

    #[test]
    fn test_restore_accepts_backup_without_collapsed_sections() {
        // Old backups from the web tracker only carried orders + employers.
        let (_env, service, view_state) = setup();
        let json = r#"{
            "orders": [],
            "employers": ["Joe Mac"],
            "exportDate": "2024-08-01T00:00:00Z"
        }"#;

        let summary = BackupService::new()
            .restore_from_json(json, &service, &view_state)
            .unwrap();
        assert_eq!(summary.restored_orders, 0);
        assert_eq!(summary.restored_employers, 1);
    }

    #[test]
    fn test_export_to_custom_path_writes_file() {
        let (env, service, view_state) = setup();
        service.create_order(sample_command()).unwrap();

        let export_dir = env.base_path.join("exports");
        let path = BackupService::new()
            .export_to_path(&service, &view_state, Some(&export_dir))
            .unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"employerName\": \"Acme\""));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("freelance-backup-"));
    }
}
