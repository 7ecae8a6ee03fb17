//! Domain models for the freelance order ledger.

pub mod order;
pub mod views;

pub use order::{ExpenseCategory, Order, OrderStatus, Payment, WorkCategory};
pub use views::{
    BackupData, GoalProgress, MonthlyStats, OrderSection, Recommendation,
    RecommendationSeverity, SectionStatusCounts, StatusFilter, StatusTotals, TitheSummary,
};
