//! Spending recommendations over the expense-category breakdown.
//!
//! Three independent checks, always evaluated in the same order: tithe,
//! savings, rent. Percentages are shares of total paid income; with zero
//! income every share is zero and nothing divides by it.

use log::debug;
use std::collections::BTreeMap;

use crate::domain::models::order::ExpenseCategory;
use crate::domain::models::views::{Recommendation, RecommendationSeverity};

const TITHE_THRESHOLD_PCT: f64 = 10.0;
// The affirmation copy advertises a 20% savings target, but the enforced
// threshold has always been 15%. Kept as shipped.
const SAVINGS_THRESHOLD_PCT: f64 = 15.0;
const RENT_THRESHOLD_PCT: f64 = 35.0;

/// Advisory engine over the category breakdown.
#[derive(Debug, Clone, Default)]
pub struct RecommendationService;

impl RecommendationService {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all checks. Every applicable recommendation is included, in
    /// the fixed order tithe, savings, rent; rent at exactly 0% emits
    /// nothing.
    pub fn evaluate(
        &self,
        category_totals: &BTreeMap<ExpenseCategory, f64>,
        total_paid_income: f64,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        let tithe_pct = Self::share(category_totals, ExpenseCategory::Tithe, total_paid_income);
        recommendations.push(if tithe_pct < TITHE_THRESHOLD_PCT {
            Self::warning(
                ExpenseCategory::Tithe,
                tithe_pct,
                format!(
                    "Tithe is at {:.1}% of paid income, below the 10% goal. Consider setting aside more.",
                    tithe_pct
                ),
            )
        } else {
            Self::affirmation(
                ExpenseCategory::Tithe,
                tithe_pct,
                format!("Tithe is at {:.1}% of paid income. Well done staying faithful.", tithe_pct),
            )
        });

        let savings_pct = Self::share(category_totals, ExpenseCategory::Savings, total_paid_income);
        recommendations.push(if savings_pct < SAVINGS_THRESHOLD_PCT {
            Self::warning(
                ExpenseCategory::Savings,
                savings_pct,
                format!(
                    "Savings are at {:.1}% of paid income. Try to work toward the 20% target.",
                    savings_pct
                ),
            )
        } else {
            Self::affirmation(
                ExpenseCategory::Savings,
                savings_pct,
                format!(
                    "Savings are at {:.1}% of paid income, on track for the 20% target.",
                    savings_pct
                ),
            )
        });

        let rent_pct = Self::share(category_totals, ExpenseCategory::Rent, total_paid_income);
        if rent_pct > RENT_THRESHOLD_PCT {
            recommendations.push(Self::warning(
                ExpenseCategory::Rent,
                rent_pct,
                format!(
                    "Rent takes {:.1}% of paid income, above the 35% guideline. Consider rebalancing.",
                    rent_pct
                ),
            ));
        } else if rent_pct > 0.0 {
            recommendations.push(Self::affirmation(
                ExpenseCategory::Rent,
                rent_pct,
                format!("Rent takes {:.1}% of paid income, within the 35% guideline.", rent_pct),
            ));
        }

        debug!(
            "Evaluated recommendations: tithe {:.1}%, savings {:.1}%, rent {:.1}%",
            tithe_pct, savings_pct, rent_pct
        );
        recommendations
    }

    fn share(
        category_totals: &BTreeMap<ExpenseCategory, f64>,
        category: ExpenseCategory,
        total_paid_income: f64,
    ) -> f64 {
        if total_paid_income <= 0.0 {
            return 0.0;
        }
        let allocated = category_totals.get(&category).copied().unwrap_or(0.0);
        (allocated / total_paid_income) * 100.0
    }

    fn warning(category: ExpenseCategory, percentage: f64, message: String) -> Recommendation {
        Recommendation {
            category,
            percentage,
            severity: RecommendationSeverity::Warning,
            message,
        }
    }

    fn affirmation(category: ExpenseCategory, percentage: f64, message: String) -> Recommendation {
        Recommendation {
            category,
            percentage,
            severity: RecommendationSeverity::Affirmation,
            message,
        }
    }
}
