//! # Freelance Ledger
//!
//! Order ledger and derived-aggregate engine for a freelance work tracker.
//! The store owns the order and employer collections; every other service is
//! a pure computation over a snapshot of them: totals by status and expense
//! category, income-goal progress, the monthly tithe, the grouped display
//! view, spending recommendations, and backup/restore.
//!
//! The host application (UI, CLI, whatever drives it) constructs a
//! [`Ledger`] over a storage [`storage::Connection`] and issues commands to
//! the store; all rendering, event wiring, and timed persistence policies
//! stay on the host's side.

use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use domain::{
    BackupService, GoalService, GroupingService, LedgerError, OrderService,
    RecommendationService, SummaryService, TargetIncomeConfig,
};
pub use storage::JsonConnection;

use storage::Connection;

/// Main entry point that wires all services over one storage connection.
pub struct Ledger<C: Connection> {
    pub order_service: OrderService<C>,
    pub summary_service: SummaryService,
    pub goal_service: GoalService,
    pub grouping_service: GroupingService,
    pub recommendation_service: RecommendationService,
    pub backup_service: BackupService,
    pub view_state_repository: C::ViewStateRepository,
}

impl<C: Connection> Ledger<C> {
    /// Create a ledger with the default income target configuration.
    pub fn new(connection: Arc<C>) -> Result<Self, LedgerError> {
        Self::with_target_config(connection, TargetIncomeConfig::default())
    }

    /// Create a ledger with an explicit income target configuration.
    pub fn with_target_config(
        connection: Arc<C>,
        config: TargetIncomeConfig,
    ) -> Result<Self, LedgerError> {
        let view_state_repository = connection.create_view_state_repository();
        let order_service = OrderService::new(connection)?;

        Ok(Ledger {
            order_service,
            summary_service: SummaryService::new(),
            goal_service: GoalService::new(config),
            grouping_service: GroupingService::new(),
            recommendation_service: RecommendationService::new(),
            backup_service: BackupService::new(),
            view_state_repository,
        })
    }
}
