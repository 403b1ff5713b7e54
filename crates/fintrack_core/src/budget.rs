//! Budget performance classification
//!
//! Compares actual in-period category spend against a target and classifies
//! each expense category, then rolls the lines up into portfolio figures.
//! Targets come from caller-configured budgets; categories without one fall
//! back to a pluggable [`BudgetDefaults`] provider.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    BudgetLine, BudgetReport, BudgetRollup, BudgetStatus, Category, CategoryId, CategoryKind,
    Transaction, TransactionKind,
};

/// Valid range for the warning threshold dial; values outside are clamped.
pub const WARNING_THRESHOLD_RANGE: (f64, f64) = (50.0, 100.0);

/// Inclusive date range selecting the transactions under classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub start: Date,
    pub end: Date,
}

impl PeriodFilter {
    #[must_use]
    pub fn contains(&self, d: Date) -> bool {
        d >= self.start && d <= self.end
    }
}

/// Supplies a target amount for categories with no configured budget.
///
/// The shipped [`KeywordDefaults`] is a placeholder heuristic with no product
/// rationale behind its numbers; hosts that want different default behavior
/// swap the provider rather than patching the classifier.
pub trait BudgetDefaults: Sync {
    /// Synthesize a target for `category`. `historical_monthly_spend` is the
    /// category's mean monthly expense total across the whole snapshot, when
    /// any history exists.
    fn default_target(&self, category: &Category, historical_monthly_spend: Option<f64>) -> f64;
}

/// Default provider: a category-name keyword multiplier over historical
/// spend, with a flat fallback when the category has no history at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDefaults {
    /// `(lowercase keyword, multiplier)` pairs, first match wins.
    pub multipliers: Vec<(String, f64)>,
    /// Multiplier for category names matching no keyword.
    pub base_multiplier: f64,
    /// Target for categories with no spending history.
    pub fallback_target: f64,
}

impl Default for KeywordDefaults {
    fn default() -> Self {
        let table = [
            ("grocer", 1.05),
            ("rent", 1.0),
            ("mortgage", 1.0),
            ("utilit", 1.1),
            ("dining", 1.2),
            ("restaurant", 1.2),
            ("entertain", 1.25),
            ("travel", 1.3),
        ];
        Self {
            multipliers: table
                .into_iter()
                .map(|(k, m)| (k.to_string(), m))
                .collect(),
            base_multiplier: 1.1,
            fallback_target: 500.0,
        }
    }
}

impl BudgetDefaults for KeywordDefaults {
    fn default_target(&self, category: &Category, historical_monthly_spend: Option<f64>) -> f64 {
        let Some(history) = historical_monthly_spend else {
            return self.fallback_target;
        };
        let name = category.name.to_lowercase();
        let multiplier = self
            .multipliers
            .iter()
            .find(|(keyword, _)| name.contains(keyword.as_str()))
            .map_or(self.base_multiplier, |(_, m)| *m);
        history * multiplier
    }
}

/// Classification tunables plus caller-configured budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Percent-used boundary between `OnTrack` and `Warning`; clamped to
    /// [50, 100].
    pub warning_threshold_pct: f64,
    /// Explicit per-category targets. Categories absent here get a
    /// synthesized default.
    pub budgets: FxHashMap<CategoryId, f64>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            warning_threshold_pct: 80.0,
            budgets: FxHashMap::default(),
        }
    }
}

/// Status as a total function of `(percent_used, warning_threshold)`.
#[must_use]
pub fn classify_status(percent_used: f64, warning_threshold: f64) -> BudgetStatus {
    if percent_used > 110.0 {
        BudgetStatus::Critical
    } else if percent_used > 100.0 {
        BudgetStatus::Over
    } else if percent_used > warning_threshold {
        BudgetStatus::Warning
    } else if percent_used > 50.0 {
        BudgetStatus::OnTrack
    } else {
        BudgetStatus::Under
    }
}

/// Classify every expense category with the shipped default provider.
#[must_use]
pub fn classify_budgets(
    transactions: &[Transaction],
    categories: &[Category],
    period: &PeriodFilter,
    config: &BudgetConfig,
) -> BudgetReport {
    classify_budgets_with(transactions, categories, period, config, &KeywordDefaults::default())
}

/// Classify every expense category, synthesizing missing targets through
/// `defaults`.
///
/// Income categories produce no lines; malformed transactions are excluded.
/// Per-category classification is data-independent, so under the `parallel`
/// feature categories are classified concurrently.
#[must_use]
pub fn classify_budgets_with(
    transactions: &[Transaction],
    categories: &[Category],
    period: &PeriodFilter,
    config: &BudgetConfig,
    defaults: &dyn BudgetDefaults,
) -> BudgetReport {
    let warning_threshold = config
        .warning_threshold_pct
        .clamp(WARNING_THRESHOLD_RANGE.0, WARNING_THRESHOLD_RANGE.1);

    #[cfg(feature = "parallel")]
    let mut lines: Vec<BudgetLine> = categories
        .par_iter()
        .filter(|c| c.kind == CategoryKind::Expense)
        .map(|c| classify_category(c, transactions, period, config, defaults, warning_threshold))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut lines: Vec<BudgetLine> = categories
        .iter()
        .filter(|c| c.kind == CategoryKind::Expense)
        .map(|c| classify_category(c, transactions, period, config, defaults, warning_threshold))
        .collect();

    lines.sort_by(|a, b| a.category_id.cmp(&b.category_id));
    let rollup = rollup(&lines);

    debug!(
        categories = lines.len(),
        health = rollup.health_score,
        "classified budget performance"
    );
    BudgetReport { lines, rollup }
}

fn classify_category(
    category: &Category,
    transactions: &[Transaction],
    period: &PeriodFilter,
    config: &BudgetConfig,
    defaults: &dyn BudgetDefaults,
    warning_threshold: f64,
) -> BudgetLine {
    let actual_spending: f64 = transactions
        .iter()
        .filter(|tx| {
            tx.is_well_formed()
                && tx.kind == TransactionKind::Expense
                && tx.category_id == Some(category.id)
                && period.contains(tx.date)
        })
        .map(|tx| tx.amount)
        .sum();

    let target_amount = match config.budgets.get(&category.id) {
        Some(&target) => target,
        None => defaults.default_target(
            category,
            historical_monthly_spend(transactions, category.id),
        ),
    };

    let percent_used = if target_amount == 0.0 {
        0.0
    } else {
        actual_spending / target_amount * 100.0
    };
    let variance = actual_spending - target_amount;
    let variance_percent = if target_amount == 0.0 {
        0.0
    } else {
        variance / target_amount * 100.0
    };

    BudgetLine {
        category_id: category.id,
        category_name: category.name.clone(),
        target_amount,
        actual_spending,
        remaining: target_amount - actual_spending,
        percent_used,
        status: classify_status(percent_used, warning_threshold),
        variance,
        variance_percent,
    }
}

/// Mean monthly expense total for a category across the whole snapshot.
/// `None` when the category has no well-formed expense history.
fn historical_monthly_spend(transactions: &[Transaction], category_id: CategoryId) -> Option<f64> {
    let mut monthly: FxHashMap<(i16, i8), f64> = FxHashMap::default();
    for tx in transactions {
        if tx.is_well_formed()
            && tx.kind == TransactionKind::Expense
            && tx.category_id == Some(category_id)
        {
            *monthly.entry((tx.date.year(), tx.date.month())).or_insert(0.0) += tx.amount;
        }
    }
    if monthly.is_empty() {
        None
    } else {
        Some(monthly.values().sum::<f64>() / monthly.len() as f64)
    }
}

fn rollup(lines: &[BudgetLine]) -> BudgetRollup {
    if lines.is_empty() {
        return BudgetRollup {
            health_score: 100.0,
            budget_efficiency: 0.0,
            projected_overrun: 0.0,
        };
    }

    let risk_score =
        lines.iter().map(|l| l.status.risk_weight()).sum::<f64>() / lines.len() as f64;
    let health_score = (100.0 - risk_score * 10.0).max(0.0);

    let efficient = lines
        .iter()
        .filter(|l| l.percent_used >= 70.0 && l.percent_used <= 100.0)
        .count();
    let budget_efficiency = efficient as f64 / lines.len() as f64 * 100.0;

    let projected_overrun = lines
        .iter()
        .filter(|l| l.percent_used > 90.0)
        .map(|l| (l.actual_spending * 1.1 - l.target_amount).max(0.0))
        .sum();

    BudgetRollup {
        health_score,
        budget_efficiency,
        projected_overrun,
    }
}
