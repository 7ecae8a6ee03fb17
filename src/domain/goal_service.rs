//! Income goal and tithe calculations.
//!
//! The target income is configuration, not derived from orders: the sum of
//! the configured monthly expenses and the minimum savings goal. The tithe
//! window is the calendar month of the reference date, over payment dates
//! only, so it must be recomputed after every mutation and whenever the
//! current date rolls over.

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::domain::commands::orders::{CreateOrderCommand, PaymentCommand};
use crate::domain::models::order::{ExpenseCategory, Order, OrderStatus, WorkCategory};
use crate::domain::models::views::{GoalProgress, StatusTotals, TitheSummary};

/// Share of monthly paid income recommended for tithe.
const TITHE_RATE: f64 = 0.10;

/// Externally configured income target inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetIncomeConfig {
    pub monthly_expenses: f64,
    pub savings_goal: f64,
}

impl Default for TargetIncomeConfig {
    fn default() -> Self {
        Self {
            monthly_expenses: 18_500.0,
            savings_goal: 10_000.0,
        }
    }
}

impl TargetIncomeConfig {
    /// Denominator for overall progress.
    pub fn target_income(&self) -> f64 {
        self.monthly_expenses + self.savings_goal
    }
}

/// Calculator for goal progress and monthly tithe.
#[derive(Debug, Clone)]
pub struct GoalService {
    config: TargetIncomeConfig,
}

impl Default for GoalService {
    fn default() -> Self {
        Self::new(TargetIncomeConfig::default())
    }
}

impl GoalService {
    pub fn new(config: TargetIncomeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TargetIncomeConfig {
        &self.config
    }

    /// Progress toward the target income, measured from the completed
    /// bucket. Percentage is clamped to [0, 100] and the remaining amount
    /// never goes negative.
    pub fn progress_toward_target(&self, totals: &StatusTotals) -> GoalProgress {
        let target = self.config.target_income();
        let earned = totals.completed;

        let percentage = if target > 0.0 {
            ((earned / target) * 100.0).min(100.0)
        } else {
            0.0
        };
        GoalProgress {
            percentage,
            remaining: (target - earned).max(0.0),
        }
    }

    /// Tithe summary for the calendar month of `reference_date`.
    ///
    /// The window is paid orders whose payment date shares month and year
    /// with the reference date, independent of workflow status or assignment
    /// date. Pure: repeated calls over the same snapshot return the same
    /// summary.
    pub fn monthly_tithe(&self, orders: &[Order], reference_date: NaiveDate) -> TitheSummary {
        let window: Vec<&Order> = orders
            .iter()
            .filter(|o| {
                o.date_paid()
                    .map(|d| {
                        d.year() == reference_date.year() && d.month() == reference_date.month()
                    })
                    .unwrap_or(false)
            })
            .collect();

        let monthly_income: f64 = window.iter().map(|o| o.amount).sum();
        let recommended_tithe = monthly_income * TITHE_RATE;
        let paid_tithe: f64 = window
            .iter()
            .filter(|o| o.paid_expense_category() == Some(ExpenseCategory::Tithe))
            .map(|o| o.amount)
            .sum();

        let tithe_percentage = if monthly_income > 0.0 {
            (paid_tithe / monthly_income) * 100.0
        } else {
            0.0
        };

        debug!(
            "Tithe window {}/{}: income {:.2}, paid tithe {:.2}",
            reference_date.month(),
            reference_date.year(),
            monthly_income,
            paid_tithe
        );

        TitheSummary {
            monthly_income,
            recommended_tithe,
            paid_tithe,
            remaining_tithe: (recommended_tithe - paid_tithe).max(0.0),
            tithe_percentage,
        }
    }

    /// Build the synthetic order for a quick tithe entry. It goes through
    /// the standard create path: one page, completed, already paid into the
    /// tithe category on the chosen date.
    pub fn quick_tithe_command(&self, amount: f64, date_paid: NaiveDate) -> CreateOrderCommand {
        CreateOrderCommand {
            category: WorkCategory::Others,
            employer_name: None,
            title: format!("Tithe payment ({})", date_paid.format("%b %Y")),
            date_assigned: date_paid,
            pages: 1,
            amount,
            status: Some(OrderStatus::Completed),
            payment: Some(PaymentCommand {
                is_paid: true,
                date_paid: Some(date_paid),
                expense_category: Some(ExpenseCategory::Tithe),
                notes: None,
            }),
        }
    }
}
