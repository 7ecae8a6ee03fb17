//! Domain model for an order.
//!
//! An order is one unit of billable freelance work. Orders are grouped for
//! display by [`WorkCategory`], move freely between the three workflow
//! statuses, and optionally carry a [`Payment`] sub-record once money has
//! come in.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Display grouping for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkCategory {
    /// Work sourced through the Writers Admin board.
    WritersAdmin,
    /// Work for a named employer; `employer_name` must be set.
    Employer,
    /// Everything else, including synthetic tithe entries.
    Others,
}

impl fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkCategory::WritersAdmin => write!(f, "writers-admin"),
            WorkCategory::Employer => write!(f, "employer"),
            WorkCategory::Others => write!(f, "others"),
        }
    }
}

/// Workflow stage of an order.
///
/// Transitions form a free graph: any status may move directly to any other,
/// there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Submitted,
    Completed,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Active => "Active",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Completed => "Completed",
        }
    }
}

/// Fixed set of expense buckets that paid income is allocated into.
///
/// The derive order is the canonical display order; `Ord` follows declaration
/// order so a `BTreeMap` keyed by this enum iterates in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Savings,
    Rent,
    Wifi,
    Utilities,
    Shopping,
    Tithe,
    Other,
}

impl ExpenseCategory {
    /// All categories in display order.
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Savings,
        ExpenseCategory::Rent,
        ExpenseCategory::Wifi,
        ExpenseCategory::Utilities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Tithe,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Savings => "Savings",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Wifi => "WiFi",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Tithe => "Tithe",
            ExpenseCategory::Other => "Other",
        }
    }
}

/// Payment sub-record attached to an order once it has been settled.
///
/// `date_paid`, `expense_category` and `notes` are only meaningful while
/// `is_paid` is true; [`Payment::normalized`] clears them otherwise so stale
/// values can never leak into aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub is_paid: bool,
    pub date_paid: Option<NaiveDate>,
    pub expense_category: Option<ExpenseCategory>,
    pub notes: Option<String>,
}

impl Payment {
    /// Return a copy with the dependent fields cleared when unpaid.
    pub fn normalized(self) -> Payment {
        if self.is_paid {
            self
        } else {
            Payment {
                is_paid: false,
                date_paid: None,
                expense_category: None,
                notes: None,
            }
        }
    }
}

/// A unit of billable freelance work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque stable token, assigned at creation and never reused.
    pub id: String,
    pub category: WorkCategory,
    /// Non-empty iff `category == Employer`; empty string otherwise.
    #[serde(default)]
    pub employer_name: String,
    pub title: String,
    /// Calendar date the work was assigned (no time component).
    pub date_assigned: NaiveDate,
    /// Always > 0; the per-page rate divides by this.
    pub pages: u32,
    pub amount: f64,
    pub status: OrderStatus,
    /// Creation timestamp (RFC 3339); drives the default newest-first sort.
    pub date_created: DateTime<FixedOffset>,
    #[serde(default)]
    pub payment: Option<Payment>,
}

impl Order {
    /// Generate a unique order ID from the creation timestamp.
    /// Format: order-<timestamp_ms>-<random_suffix>
    /// Example: order-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("order-{}-{}", timestamp_ms, Self::generate_random_suffix(4))
    }

    /// Generate a random hex suffix for order IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }

    /// Whether the order has been paid.
    pub fn is_paid(&self) -> bool {
        self.payment.as_ref().map(|p| p.is_paid).unwrap_or(false)
    }

    /// Expense category the payment was allocated into, if paid.
    pub fn paid_expense_category(&self) -> Option<ExpenseCategory> {
        self.payment
            .as_ref()
            .filter(|p| p.is_paid)
            .and_then(|p| p.expense_category)
    }

    /// Date the payment landed, if paid.
    pub fn date_paid(&self) -> Option<NaiveDate> {
        self.payment
            .as_ref()
            .filter(|p| p.is_paid)
            .and_then(|p| p.date_paid)
    }

    /// Derived per-page rate. `pages` is validated > 0 on every write path.
    pub fn per_page_rate(&self) -> f64 {
        self.amount / self.pages as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_order() -> Order {
        Order {
            id: Order::generate_id(1_625_846_400_123),
            category: WorkCategory::Employer,
            employer_name: "Acme".to_string(),
            title: "Website copy".to_string(),
            date_assigned: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            pages: 2,
            amount: 1000.0,
            status: OrderStatus::Active,
            date_created: FixedOffset::east_opt(3 * 3600)
                .unwrap()
                .with_ymd_and_hms(2025, 8, 1, 9, 0, 0)
                .unwrap(),
            payment: None,
        }
    }

    #[test]
    fn test_generate_id_format() {
        let id = Order::generate_id(1_625_846_400_123);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "order");
        assert_eq!(parts[1], "1625846400123");
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_per_page_rate() {
        let order = sample_order();
        assert_eq!(order.per_page_rate(), 500.0);
    }

    #[test]
    fn test_payment_normalized_clears_fields_when_unpaid() {
        let payment = Payment {
            is_paid: false,
            date_paid: NaiveDate::from_ymd_opt(2025, 8, 10),
            expense_category: Some(ExpenseCategory::Rent),
            notes: Some("stale".to_string()),
        }
        .normalized();

        assert!(!payment.is_paid);
        assert!(payment.date_paid.is_none());
        assert!(payment.expense_category.is_none());
        assert!(payment.notes.is_none());
    }

    #[test]
    fn test_payment_normalized_keeps_fields_when_paid() {
        let payment = Payment {
            is_paid: true,
            date_paid: NaiveDate::from_ymd_opt(2025, 8, 10),
            expense_category: Some(ExpenseCategory::Tithe),
            notes: None,
        }
        .normalized();

        assert!(payment.is_paid);
        assert_eq!(payment.expense_category, Some(ExpenseCategory::Tithe));
    }

    #[test]
    fn test_paid_accessors_ignore_unpaid_record() {
        let mut order = sample_order();
        order.payment = Some(Payment {
            is_paid: false,
            date_paid: NaiveDate::from_ymd_opt(2025, 8, 10),
            expense_category: Some(ExpenseCategory::Rent),
            notes: None,
        });

        assert!(!order.is_paid());
        assert!(order.paid_expense_category().is_none());
        assert!(order.date_paid().is_none());
    }

    #[test]
    fn test_serde_uses_original_field_names() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"employerName\""));
        assert!(json.contains("\"dateAssigned\""));
        assert!(json.contains("\"dateCreated\""));
        assert!(json.contains("\"category\":\"employer\""));
    }
}
