//! # Storage Traits
//!
//! Storage abstraction for the order ledger. The domain layer works against
//! these traits so different backends (JSON files, browser storage bridges,
//! in-memory test doubles) are interchangeable.
//!
//! All operations are synchronous; the ledger performs no blocking work of
//! its own beyond these reads and writes.

use crate::domain::models::order::Order;
use anyhow::Result;
use std::collections::HashMap;

/// Interface for order persistence.
///
/// A failed save must leave the caller's in-memory collection untouched; the
/// ledger keeps operating on its in-memory state and surfaces the failure.
pub trait OrderStorage: Send + Sync {
    /// Load all persisted orders. Absence of prior data is not an error and
    /// yields an empty list.
    fn load_orders(&self) -> Result<Vec<Order>>;

    /// Persist the full order list, replacing whatever was stored before.
    fn save_orders(&self, orders: &[Order]) -> Result<()>;
}

/// Interface for employer-name persistence.
pub trait EmployerStorage: Send + Sync {
    /// Load the employer set. Returns `None` when nothing has ever been
    /// saved, so the caller can seed its defaults.
    fn load_employers(&self) -> Result<Option<Vec<String>>>;

    /// Persist the full employer list.
    fn save_employers(&self, employers: &[String]) -> Result<()>;
}

/// Interface for collapsed-section view state.
///
/// This is a pure view-state cache: stale keys are harmless and lookups for
/// unknown sections default to not-collapsed.
pub trait ViewStateStorage: Send + Sync {
    /// Load the collapsed flags keyed by section id; empty map on absence.
    fn load_collapsed_sections(&self) -> Result<HashMap<String, bool>>;

    /// Persist the collapsed flags, replacing the previous map.
    fn save_collapsed_sections(&self, sections: &HashMap<String, bool>) -> Result<()>;
}

/// Factory for the repositories of one storage backend.
///
/// Mirrors the repository-per-aggregate layout: a connection value carries
/// the backend configuration (directory, key prefix) and hands out cheap
/// repository handles over it.
pub trait Connection: Send + Sync + Clone {
    type OrderRepository: OrderStorage;
    type EmployerRepository: EmployerStorage;
    type ViewStateRepository: ViewStateStorage;

    fn create_order_repository(&self) -> Self::OrderRepository;
    fn create_employer_repository(&self) -> Self::EmployerRepository;
    fn create_view_state_repository(&self) -> Self::ViewStateRepository;
}
