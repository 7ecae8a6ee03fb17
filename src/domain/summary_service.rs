//! Status and category aggregation for the freelance ledger.
//!
//! Pure computations over an order snapshot; nothing here mutates or retains
//! the collection it is handed.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::domain::models::order::{ExpenseCategory, Order, OrderStatus};
use crate::domain::models::views::{MonthlyStats, StatusTotals};

/// Aggregator over an order snapshot.
#[derive(Debug, Clone, Default)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Sum amounts per workflow status. Every bucket is present; the three
    /// buckets together always equal the grand total of the snapshot.
    pub fn totals_by_status(&self, orders: &[Order]) -> StatusTotals {
        let mut totals = StatusTotals {
            active: 0.0,
            submitted: 0.0,
            completed: 0.0,
        };
        for order in orders {
            match order.status {
                OrderStatus::Active => totals.active += order.amount,
                OrderStatus::Submitted => totals.submitted += order.amount,
                OrderStatus::Completed => totals.completed += order.amount,
            }
        }
        totals
    }

    /// Sum of amounts over paid orders, regardless of workflow status.
    pub fn total_paid_income(&self, orders: &[Order]) -> f64 {
        orders
            .iter()
            .filter(|o| o.is_paid())
            .map(|o| o.amount)
            .sum()
    }

    /// Paid income per expense category. All categories are always present
    /// (zero when unused) and iterate in the fixed display order. Paid orders
    /// without a category contribute to no bucket.
    pub fn totals_by_expense_category(&self, orders: &[Order]) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals: BTreeMap<ExpenseCategory, f64> = ExpenseCategory::ALL
            .iter()
            .map(|category| (*category, 0.0))
            .collect();

        for order in orders {
            if let Some(category) = order.paid_expense_category() {
                *totals.entry(category).or_insert(0.0) += order.amount;
            }
        }
        totals
    }

    /// Order statistics for one calendar month, windowed by assignment date.
    pub fn monthly_stats(&self, orders: &[Order], year: i32, month: u32) -> MonthlyStats {
        let month_orders: Vec<&Order> = orders
            .iter()
            .filter(|o| o.date_assigned.year() == year && o.date_assigned.month() == month)
            .collect();

        MonthlyStats {
            total_orders: month_orders.len(),
            total_earnings: month_orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .map(|o| o.amount)
                .sum(),
            active_orders: month_orders
                .iter()
                .filter(|o| o.status == OrderStatus::Active)
                .count(),
            completed_orders: month_orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
            total_pages: month_orders.iter().map(|o| o.pages as u64).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{order_with_status, paid};
    use chrono::NaiveDate;

    #[test]
    fn test_totals_by_status_conserves_grand_total() {
        let orders = vec![
            order_with_status("a", 1000.0, OrderStatus::Active),
            order_with_status("b", 2500.0, OrderStatus::Submitted),
            order_with_status("c", 4000.0, OrderStatus::Completed),
            order_with_status("d", 500.0, OrderStatus::Active),
        ];

        let totals = SummaryService::new().totals_by_status(&orders);
        assert_eq!(totals.active, 1500.0);
        assert_eq!(totals.submitted, 2500.0);
        assert_eq!(totals.completed, 4000.0);

        let sum: f64 = orders.iter().map(|o| o.amount).sum();
        assert_eq!(totals.grand_total(), sum);
    }

    #[test]
    fn test_totals_by_status_empty_snapshot() {
        let totals = SummaryService::new().totals_by_status(&[]);
        assert_eq!(totals.grand_total(), 0.0);
    }

    #[test]
    fn test_total_paid_income_ignores_status() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
        let orders = vec![
            paid(
                order_with_status("a", 1000.0, OrderStatus::Active),
                Some(ExpenseCategory::Rent),
                date,
            ),
            paid(
                order_with_status("b", 2000.0, OrderStatus::Completed),
                Some(ExpenseCategory::Savings),
                date,
            ),
            order_with_status("c", 9000.0, OrderStatus::Completed),
        ];

        assert_eq!(SummaryService::new().total_paid_income(&orders), 3000.0);
    }

    #[test]
    fn test_category_totals_cover_all_categories_in_order() {
        let totals = SummaryService::new().totals_by_expense_category(&[]);
        let keys: Vec<ExpenseCategory> = totals.keys().copied().collect();
        assert_eq!(keys, ExpenseCategory::ALL.to_vec());
        assert!(totals.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_category_totals_reconcile_with_paid_income() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
        let orders = vec![
            paid(
                order_with_status("a", 1000.0, OrderStatus::Completed),
                Some(ExpenseCategory::Tithe),
                date,
            ),
            paid(
                order_with_status("b", 3000.0, OrderStatus::Completed),
                Some(ExpenseCategory::Rent),
                date,
            ),
        ];

        let service = SummaryService::new();
        let totals = service.totals_by_expense_category(&orders);
        assert_eq!(totals[&ExpenseCategory::Tithe], 1000.0);
        assert_eq!(totals[&ExpenseCategory::Rent], 3000.0);

        let category_sum: f64 = totals.values().sum();
        assert_eq!(category_sum, service.total_paid_income(&orders));
    }

    #[test]
    fn test_paid_order_without_category_skips_buckets() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
        let orders = vec![paid(
            order_with_status("a", 1000.0, OrderStatus::Completed),
            None,
            date,
        )];

        let service = SummaryService::new();
        assert_eq!(service.total_paid_income(&orders), 1000.0);
        let totals = service.totals_by_expense_category(&orders);
        assert!(totals.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_monthly_stats_windows_by_assignment_date() {
        let mut in_month = order_with_status("a", 2500.0, OrderStatus::Completed);
        in_month.date_assigned = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        in_month.pages = 5;

        let mut also_in_month = order_with_status("b", 1500.0, OrderStatus::Active);
        also_in_month.date_assigned = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        also_in_month.pages = 3;

        let mut other_month = order_with_status("c", 4000.0, OrderStatus::Completed);
        other_month.date_assigned = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();

        let stats = SummaryService::new().monthly_stats(
            &[in_month, also_in_month, other_month],
            2025,
            8,
        );
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_earnings, 2500.0);
        assert_eq!(stats.active_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.total_pages, 8);
    }
}
