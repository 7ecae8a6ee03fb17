//! Shared builders for domain tests.

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};

use crate::domain::models::order::{
    ExpenseCategory, Order, OrderStatus, Payment, WorkCategory,
};

/// Build an order with explicit category and employer name.
pub fn order(
    id: &str,
    category: WorkCategory,
    employer_name: &str,
    amount: f64,
    status: OrderStatus,
) -> Order {
    Order {
        id: format!("order-1-{}", id),
        category,
        employer_name: employer_name.to_string(),
        title: format!("Work item {}", id),
        date_assigned: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        pages: 2,
        amount,
        status,
        date_created: FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 8, 1, 9, 0, 0)
            .unwrap(),
        payment: None,
    }
}

/// Writers Admin order with the given amount and status.
pub fn order_with_status(id: &str, amount: f64, status: OrderStatus) -> Order {
    order(id, WorkCategory::WritersAdmin, "", amount, status)
}

/// Mark an order as paid into a category on a given date.
pub fn paid(mut order: Order, category: Option<ExpenseCategory>, date_paid: NaiveDate) -> Order {
    order.payment = Some(Payment {
        is_paid: true,
        date_paid: Some(date_paid),
        expense_category: category,
        notes: None,
    });
    order
}

/// Shift the creation timestamp forward so sort order is deterministic.
pub fn created_after(mut order: Order, seconds: i64) -> Order {
    order.date_created += Duration::seconds(seconds);
    order
}
