//! Order & employer store for the freelance ledger.
//!
//! This service owns the canonical order and employer collections. They are
//! loaded from storage once at construction, every mutation runs to
//! completion on the in-memory state, and the result is written through to
//! the storage backend afterwards. All reads hand out cloned snapshots.
//!
//! Failure semantics: validation and not-found errors are raised before any
//! mutation, so they leave the store untouched. A storage write failure is
//! returned as [`LedgerError::Storage`] after the in-memory mutation has
//! committed; the in-memory state stays authoritative and the service keeps
//! operating.

use anyhow::Context;
use chrono::{FixedOffset, Utc};
use log::{info, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::commands::orders::{
    CreateOrderCommand, DeleteEmployerResult, PaymentCommand, RestoreSummary, UpdateOrderCommand,
};
use crate::domain::errors::{LedgerError, Result};
use crate::domain::models::order::{Order, OrderStatus, Payment, WorkCategory};
use crate::storage::traits::{Connection, EmployerStorage, OrderStorage};

/// Employers seeded when the storage backend has never been written.
pub const DEFAULT_EMPLOYERS: [&str; 2] = ["Joe Mac", "Brian Oyaro"];

/// Tracker timestamps are kept in East Africa Time (UTC+3).
fn eat_offset() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).expect("valid fixed offset")
}

struct LedgerState {
    orders: Vec<Order>,
    employers: Vec<String>,
}

/// Service owning the order and employer collections.
pub struct OrderService<C: Connection> {
    order_repository: C::OrderRepository,
    employer_repository: C::EmployerRepository,
    state: Arc<Mutex<LedgerState>>,
}

impl<C: Connection> OrderService<C> {
    /// Load the store from the given connection, seeding default employers
    /// when nothing has been persisted yet.
    pub fn new(connection: Arc<C>) -> Result<Self> {
        let order_repository = connection.create_order_repository();
        let employer_repository = connection.create_employer_repository();

        let orders = order_repository.load_orders()?;
        let mut employers = match employer_repository.load_employers()? {
            Some(list) => list,
            None => DEFAULT_EMPLOYERS.iter().map(|s| s.to_string()).collect(),
        };

        // Referential repair: every employer-category order must have its
        // name in the employer set.
        for order in &orders {
            if order.category == WorkCategory::Employer
                && !employers.iter().any(|e| e == &order.employer_name)
            {
                warn!(
                    "Order {} references unknown employer '{}', re-adding it",
                    order.id, order.employer_name
                );
                employers.push(order.employer_name.clone());
            }
        }

        info!(
            "Loaded {} orders and {} employers",
            orders.len(),
            employers.len()
        );

        Ok(Self {
            order_repository,
            employer_repository,
            state: Arc::new(Mutex::new(LedgerState { orders, employers })),
        })
    }

    /// Create a new order, upserting its employer name if needed.
    pub fn create_order(&self, command: CreateOrderCommand) -> Result<Order> {
        Self::validate_order_fields(&command.title, command.pages, command.amount)?;
        let employer_name =
            Self::validate_employer_name(command.category, command.employer_name.as_deref())?;

        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(anyhow::Error::from)?
            .as_millis() as u64;

        let order = Order {
            id: Order::generate_id(now_millis),
            category: command.category,
            employer_name,
            title: command.title.trim().to_string(),
            date_assigned: command.date_assigned,
            pages: command.pages,
            amount: command.amount,
            status: command.status.unwrap_or(OrderStatus::Active),
            date_created: Utc::now().with_timezone(&eat_offset()),
            payment: command.payment.map(|p| Self::payment_from_command(p)),
        };

        let mut state = self.state.lock().unwrap();
        let employer_added = Self::upsert_employer(&mut state, &order);
        state.orders.push(order.clone());

        info!(
            "Created order {} ({}, {})",
            order.id, order.category, order.title
        );

        self.persist_orders(&state)?;
        if employer_added {
            self.persist_employers(&state)?;
        }
        Ok(order)
    }

    /// Apply a partial update to an existing order. The employer-name
    /// invariant is re-validated whenever category or name change.
    pub fn update_order(&self, command: UpdateOrderCommand) -> Result<Order> {
        let mut state = self.state.lock().unwrap();
        let index = Self::find_order_index(&state, &command.order_id)?;

        let mut updated = state.orders[index].clone();
        if let Some(title) = command.title {
            updated.title = title;
        }
        if let Some(category) = command.category {
            updated.category = category;
        }
        if let Some(employer_name) = command.employer_name {
            updated.employer_name = employer_name;
        }
        if let Some(date_assigned) = command.date_assigned {
            updated.date_assigned = date_assigned;
        }
        if let Some(pages) = command.pages {
            updated.pages = pages;
        }
        if let Some(amount) = command.amount {
            updated.amount = amount;
        }
        if let Some(status) = command.status {
            updated.status = status;
        }

        Self::validate_order_fields(&updated.title, updated.pages, updated.amount)?;
        updated.employer_name =
            Self::validate_employer_name(updated.category, Some(&updated.employer_name))?;
        updated.title = updated.title.trim().to_string();

        let employer_added = Self::upsert_employer(&mut state, &updated);
        state.orders[index] = updated.clone();

        info!("Updated order {}", updated.id);

        self.persist_orders(&state)?;
        if employer_added {
            self.persist_employers(&state)?;
        }
        Ok(updated)
    }

    /// Set the workflow status of an order. Any status may move directly to
    /// any other; an unchanged status is still persisted.
    pub fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order> {
        let mut state = self.state.lock().unwrap();
        let index = Self::find_order_index(&state, order_id)?;

        state.orders[index].status = status;
        let order = state.orders[index].clone();
        info!("Order {} is now {}", order.id, status.label());

        self.persist_orders(&state)?;
        Ok(order)
    }

    /// Replace an order's payment sub-record wholesale. Unpaid records are
    /// normalized so no stale date or category survives.
    pub fn set_payment(&self, order_id: &str, command: PaymentCommand) -> Result<Order> {
        let mut state = self.state.lock().unwrap();
        let index = Self::find_order_index(&state, order_id)?;

        state.orders[index].payment = Some(Self::payment_from_command(command));
        let order = state.orders[index].clone();
        info!(
            "Payment for order {} set (paid: {})",
            order.id,
            order.is_paid()
        );

        self.persist_orders(&state)?;
        Ok(order)
    }

    /// Delete an order. Deleting an unknown (or already deleted) id is a
    /// `NotFound` error, not a silent no-op.
    pub fn delete_order(&self, order_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let index = Self::find_order_index(&state, order_id)?;

        let removed = state.orders.remove(index);
        info!("Deleted order {} ({})", removed.id, removed.title);

        self.persist_orders(&state)?;
        Ok(())
    }

    /// Explicitly add an employer name. Adding an existing name is a no-op;
    /// returns whether the name was new.
    pub fn add_employer(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "employer name cannot be empty".to_string(),
            ));
        }

        let mut state = self.state.lock().unwrap();
        if state.employers.iter().any(|e| e == name) {
            return Ok(false);
        }

        state.employers.push(name.to_string());
        info!("Added employer '{}'", name);

        self.persist_employers(&state)?;
        Ok(true)
    }

    /// Delete an employer and cascade-delete all their orders atomically.
    pub fn delete_employer(&self, name: &str) -> Result<DeleteEmployerResult> {
        let mut state = self.state.lock().unwrap();
        let position = state
            .employers
            .iter()
            .position(|e| e == name)
            .ok_or_else(|| LedgerError::NotFound(format!("employer '{}'", name)))?;

        state.employers.remove(position);
        let before = state.orders.len();
        state
            .orders
            .retain(|o| !(o.category == WorkCategory::Employer && o.employer_name == name));
        let deleted_orders = before - state.orders.len();

        info!(
            "Deleted employer '{}' and {} of their orders",
            name, deleted_orders
        );

        self.persist_orders(&state)?;
        self.persist_employers(&state)?;
        Ok(DeleteEmployerResult {
            employer_name: name.to_string(),
            deleted_orders,
        })
    }

    /// Delete every order. The employer set is retained.
    pub fn clear_orders(&self) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let cleared = state.orders.len();
        state.orders.clear();
        info!("Cleared all {} orders", cleared);

        self.persist_orders(&state)?;
        Ok(cleared)
    }

    /// Wholesale replacement of the store contents, used by restore. The
    /// incoming data is validated in full before anything is swapped in.
    pub fn replace_all(
        &self,
        orders: Vec<Order>,
        mut employers: Vec<String>,
    ) -> Result<RestoreSummary> {
        employers.retain(|e| !e.trim().is_empty());
        let mut seen = HashSet::new();
        employers.retain(|e| seen.insert(e.clone()));

        for order in &orders {
            Self::validate_order_fields(&order.title, order.pages, order.amount)
                .map_err(|e| LedgerError::Format(format!("order {}: {}", order.id, e)))?;
            if order.category == WorkCategory::Employer {
                if order.employer_name.trim().is_empty() {
                    return Err(LedgerError::Format(format!(
                        "order {} has an employer category but no employer name",
                        order.id
                    )));
                }
                if !employers.iter().any(|e| e == &order.employer_name) {
                    employers.push(order.employer_name.clone());
                }
            }
        }
        if let Some(order) = orders
            .iter()
            .enumerate()
            .find(|(i, o)| orders[..*i].iter().any(|p| p.id == o.id))
            .map(|(_, o)| o)
        {
            return Err(LedgerError::Format(format!(
                "duplicate order id '{}'",
                order.id
            )));
        }

        let summary = RestoreSummary {
            restored_orders: orders.len(),
            restored_employers: employers.len(),
        };

        let mut state = self.state.lock().unwrap();
        state.orders = orders;
        state.employers = employers;
        info!(
            "Replaced store contents: {} orders, {} employers",
            summary.restored_orders, summary.restored_employers
        );

        self.persist_orders(&state)?;
        self.persist_employers(&state)?;
        Ok(summary)
    }

    /// Snapshot of all orders, newest first is NOT applied here; callers that
    /// need display order go through the grouping service.
    pub fn list_orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    /// Snapshot of the employer set in insertion order.
    pub fn list_employers(&self) -> Vec<String> {
        self.state.lock().unwrap().employers.clone()
    }

    /// Look up one order by id.
    pub fn get_order(&self, order_id: &str) -> Result<Order> {
        let state = self.state.lock().unwrap();
        let index = Self::find_order_index(&state, order_id)?;
        Ok(state.orders[index].clone())
    }

    fn find_order_index(state: &LedgerState, order_id: &str) -> Result<usize> {
        state
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| LedgerError::NotFound(format!("order '{}'", order_id)))
    }

    fn validate_order_fields(title: &str, pages: u32, amount: f64) -> Result<()> {
        if title.trim().is_empty() {
            return Err(LedgerError::Validation(
                "order title cannot be empty".to_string(),
            ));
        }
        if pages == 0 {
            return Err(LedgerError::Validation(
                "pages must be greater than zero".to_string(),
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::Validation(
                "amount must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize the employer name for the given category: required and
    /// non-blank for employer orders, forced empty for everything else.
    fn validate_employer_name(
        category: WorkCategory,
        employer_name: Option<&str>,
    ) -> Result<String> {
        match category {
            WorkCategory::Employer => {
                let name = employer_name.unwrap_or("").trim();
                if name.is_empty() {
                    return Err(LedgerError::Validation(
                        "employer name is required for employer orders".to_string(),
                    ));
                }
                Ok(name.to_string())
            }
            _ => Ok(String::new()),
        }
    }

    fn payment_from_command(command: PaymentCommand) -> Payment {
        Payment {
            is_paid: command.is_paid,
            date_paid: command.date_paid,
            expense_category: command.expense_category,
            notes: command.notes,
        }
        .normalized()
    }

    /// Upsert the order's employer name into the employer set. Returns true
    /// when a new name was added.
    fn upsert_employer(state: &mut LedgerState, order: &Order) -> bool {
        if order.category != WorkCategory::Employer {
            return false;
        }
        if state.employers.iter().any(|e| e == &order.employer_name) {
            return false;
        }
        info!("Upserting new employer '{}'", order.employer_name);
        state.employers.push(order.employer_name.clone());
        true
    }

    fn persist_orders(&self, state: &LedgerState) -> Result<()> {
        self.order_repository
            .save_orders(&state.orders)
            .context("Failed to persist orders; in-memory state is still current")?;
        Ok(())
    }

    fn persist_employers(&self, state: &LedgerState) -> Result<()> {
        self.employer_repository
            .save_employers(&state.employers)
            .context("Failed to persist employers; in-memory state is still current")?;
        Ok(())
    }
}
