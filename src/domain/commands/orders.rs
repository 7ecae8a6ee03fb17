//! Command and result structures for store mutations.
//!
//! The UI collects intent (ids, field values) and hands it to the order
//! service as one of these commands; nothing in the domain depends on how
//! the intent was gathered.

use crate::domain::models::order::{ExpenseCategory, OrderStatus, WorkCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Command to create a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    pub category: WorkCategory,
    /// Required and non-blank when `category == Employer`; ignored otherwise.
    pub employer_name: Option<String>,
    pub title: String,
    pub date_assigned: NaiveDate,
    pub pages: u32,
    pub amount: f64,
    /// Defaults to `Active`; the quick-tithe path creates `Completed` orders
    /// through this same command.
    pub status: Option<OrderStatus>,
    /// Optional initial payment record (normalized before storage).
    pub payment: Option<PaymentCommand>,
}

/// Partial update of an existing order. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateOrderCommand {
    pub order_id: String,
    pub title: Option<String>,
    pub category: Option<WorkCategory>,
    pub employer_name: Option<String>,
    pub date_assigned: Option<NaiveDate>,
    pub pages: Option<u32>,
    pub amount: Option<f64>,
    pub status: Option<OrderStatus>,
}

/// Wholesale replacement of an order's payment sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCommand {
    pub is_paid: bool,
    pub date_paid: Option<NaiveDate>,
    pub expense_category: Option<ExpenseCategory>,
    pub notes: Option<String>,
}

/// Outcome of a cascading employer deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEmployerResult {
    pub employer_name: String,
    /// Number of orders removed by the cascade.
    pub deleted_orders: usize,
}

/// Outcome of a wholesale restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub restored_orders: usize,
    pub restored_employers: usize,
}
