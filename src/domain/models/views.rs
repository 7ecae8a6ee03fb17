//! Derived view values returned to the presentation layer.
//!
//! Every structure here is a freshly computed value, never an alias into the
//! store's own collections, so callers can hold or mutate them freely.

use crate::domain::models::order::{ExpenseCategory, Order, OrderStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sum of order amounts per workflow status. All three buckets are always
/// present; a status with no orders reports 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusTotals {
    pub active: f64,
    pub submitted: f64,
    pub completed: f64,
}

impl StatusTotals {
    pub fn grand_total(&self) -> f64 {
        self.active + self.submitted + self.completed
    }
}

/// Per-month order statistics, windowed by assignment date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_orders: usize,
    /// Earnings counted from completed orders only.
    pub total_earnings: f64,
    pub active_orders: usize,
    pub completed_orders: usize,
    pub total_pages: u64,
}

/// Progress toward the configured target income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Clamped to [0, 100].
    pub percentage: f64,
    /// Clamped to >= 0.
    pub remaining: f64,
}

/// Monthly tithe obligation derived from paid orders in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitheSummary {
    /// Paid income whose payment date falls in the reference month.
    pub monthly_income: f64,
    /// 10% of the monthly income.
    pub recommended_tithe: f64,
    /// Amount already allocated to the tithe category in the same window.
    pub paid_tithe: f64,
    /// Outstanding balance, never negative.
    pub remaining_tithe: f64,
    /// Paid tithe as a share of monthly income; 0 when there is no income.
    pub tithe_percentage: f64,
}

/// Status filter applied to the grouped order view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Active,
    Submitted,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == OrderStatus::Active,
            StatusFilter::Submitted => status == OrderStatus::Submitted,
            StatusFilter::Completed => status == OrderStatus::Completed,
        }
    }
}

/// Number of orders per status within one section of the grouped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionStatusCounts {
    pub active: usize,
    pub submitted: usize,
    pub completed: usize,
}

/// One section of the grouped order view (Writers Admin, a single employer,
/// or Others), carrying its own sub-totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSection {
    pub title: String,
    /// Stable key for collapse state: `writers-admin`, `employer-<name>`,
    /// or `others`.
    pub section_id: String,
    /// Sorted newest date_created first.
    pub orders: Vec<Order>,
    pub status_counts: SectionStatusCounts,
    pub total_amount: f64,
}

/// Advisory severity for a spending recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationSeverity {
    Warning,
    Affirmation,
}

/// One advisory message about how paid income is being allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: ExpenseCategory,
    /// Share of total paid income allocated to the category.
    pub percentage: f64,
    pub severity: RecommendationSeverity,
    pub message: String,
}

/// Backup artifact written by the export feature and accepted by restore.
///
/// The field names match the JSON files the web tracker produced, so old
/// backups restore cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub orders: Vec<Order>,
    pub employers: Vec<String>,
    #[serde(default)]
    pub collapsed_sections: HashMap<String, bool>,
    /// ISO-8601 timestamp of when the backup was taken.
    #[serde(default)]
    pub export_date: String,
}
