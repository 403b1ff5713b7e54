//! Budget classification output types
//!
//! "Variance" here is the budget sense (`actual - target`), not the
//! statistical squared-deviation used for volatility.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// How far into (or past) its budget a category is.
///
/// A total function of `(percent_used, warning_threshold)`:
/// `>110 → Critical`, `>100 → Over`, `>threshold → Warning`,
/// `>50 → OnTrack`, else `Under`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetStatus {
    Critical,
    Over,
    Warning,
    OnTrack,
    Under,
}

impl BudgetStatus {
    /// Risk weight used by the portfolio rollup.
    #[must_use]
    pub fn risk_weight(&self) -> f64 {
        match self {
            BudgetStatus::Critical => 10.0,
            BudgetStatus::Over => 7.0,
            BudgetStatus::Warning => 4.0,
            BudgetStatus::Under => 2.0,
            BudgetStatus::OnTrack => 1.0,
        }
    }
}

/// Per-category budget performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category_id: CategoryId,
    pub category_name: String,
    pub target_amount: f64,
    /// Sum of in-period expense magnitudes for the category.
    pub actual_spending: f64,
    /// `target - actual` (negative when over budget).
    pub remaining: f64,
    /// `actual / target * 100`; 0 when the target is 0.
    pub percent_used: f64,
    pub status: BudgetStatus,
    /// `actual - target`.
    pub variance: f64,
    pub variance_percent: f64,
}

/// Portfolio-level rollup across all classified categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRollup {
    /// `max(0, 100 - mean_risk_weight * 10)`. 100 when no categories exist.
    pub health_score: f64,
    /// Percentage of categories sitting in the 70..=100 percent-used band.
    pub budget_efficiency: f64,
    /// Summed shortfall across categories above 90% used, assuming spending
    /// grows another 10%.
    pub projected_overrun: f64,
}

/// Full classification result: one line per expense category plus rollups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub lines: Vec<BudgetLine>,
    pub rollup: BudgetRollup,
}
