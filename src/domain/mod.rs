//! Domain layer: the order/employer store and every derived-aggregate
//! service computed from it.

pub mod backup_service;
pub mod commands;
pub mod errors;
pub mod goal_service;
pub mod grouping_service;
pub mod models;
pub mod order_service;
pub mod recommendation_service;
pub mod summary_service;

#[cfg(test)]
pub mod test_support;

pub use backup_service::BackupService;
pub use errors::{LedgerError, Result};
pub use goal_service::{GoalService, TargetIncomeConfig};
pub use grouping_service::GroupingService;
pub use order_service::OrderService;
pub use recommendation_service::RecommendationService;
pub use summary_service::SummaryService;
