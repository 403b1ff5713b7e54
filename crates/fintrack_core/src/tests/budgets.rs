//! Tests for budget performance classification
//!
//! These tests verify:
//! - Status as a total function of (percent_used, threshold)
//! - Threshold clamping
//! - Explicit budgets vs synthesized defaults
//! - Portfolio rollups

use super::{assert_close, category, expense_in, income};
use crate::budget::{
    BudgetConfig, BudgetDefaults, KeywordDefaults, PeriodFilter, classify_budgets,
    classify_budgets_with, classify_status,
};
use crate::model::{BudgetStatus, Category, CategoryId, CategoryKind};
use jiff::civil::date;
use rustc_hash::FxHashMap;

fn january() -> PeriodFilter {
    PeriodFilter {
        start: date(2024, 1, 1),
        end: date(2024, 1, 31),
    }
}

fn config_with(budgets: &[(u16, f64)], threshold: f64) -> BudgetConfig {
    BudgetConfig {
        warning_threshold_pct: threshold,
        budgets: budgets
            .iter()
            .map(|&(id, target)| (CategoryId(id), target))
            .collect::<FxHashMap<_, _>>(),
    }
}

#[test]
fn test_status_is_a_total_function() {
    assert_eq!(classify_status(120.0, 80.0), BudgetStatus::Critical);
    assert_eq!(classify_status(105.0, 80.0), BudgetStatus::Over);
    assert_eq!(classify_status(85.0, 80.0), BudgetStatus::Warning);
    assert_eq!(classify_status(60.0, 80.0), BudgetStatus::OnTrack);
    assert_eq!(classify_status(10.0, 80.0), BudgetStatus::Under);
}

#[test]
fn test_status_boundaries_are_exclusive() {
    assert_eq!(classify_status(110.0, 80.0), BudgetStatus::Over);
    assert_eq!(classify_status(100.0, 80.0), BudgetStatus::Warning);
    assert_eq!(classify_status(80.0, 80.0), BudgetStatus::OnTrack);
    assert_eq!(classify_status(50.0, 80.0), BudgetStatus::Under);
}

#[test]
fn test_line_arithmetic_with_explicit_budget() {
    let transactions = vec![
        expense_in(1, 2024, 1, 5, 300.0, 1),
        expense_in(2, 2024, 1, 20, 150.0, 1),
        // Outside the period: must not count toward actual spending
        expense_in(3, 2024, 2, 1, 999.0, 1),
    ];
    let categories = vec![category(1, "Groceries", CategoryKind::Expense)];
    let config = config_with(&[(1, 600.0)], 80.0);

    let report = classify_budgets(&transactions, &categories, &january(), &config);
    assert_eq!(report.lines.len(), 1);

    let line = &report.lines[0];
    assert_close(line.actual_spending, 450.0, "in-period spend");
    assert_close(line.target_amount, 600.0, "explicit target");
    assert_close(line.remaining, 150.0, "remaining");
    assert_close(line.percent_used, 75.0, "percent used");
    assert_close(line.variance, -150.0, "variance");
    assert_close(line.variance_percent, -25.0, "variance percent");
    assert_eq!(line.status, BudgetStatus::OnTrack);
}

#[test]
fn test_income_categories_are_not_classified() {
    let transactions = vec![income(1, 2024, 1, 5, 5000.0)];
    let categories = vec![
        category(1, "Salary", CategoryKind::Income),
        category(2, "Rent", CategoryKind::Expense),
    ];

    let report = classify_budgets(
        &transactions,
        &categories,
        &january(),
        &BudgetConfig::default(),
    );
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].category_id, CategoryId(2));
}

#[test]
fn test_zero_target_guards_division() {
    let transactions = vec![expense_in(1, 2024, 1, 5, 100.0, 1)];
    let categories = vec![category(1, "Misc", CategoryKind::Expense)];
    let config = config_with(&[(1, 0.0)], 80.0);

    let report = classify_budgets(&transactions, &categories, &january(), &config);
    let line = &report.lines[0];
    assert_close(line.percent_used, 0.0, "percent used with zero target");
    assert_close(line.variance_percent, 0.0, "variance percent with zero target");
    assert_eq!(line.status, BudgetStatus::Under);
}

#[test]
fn test_warning_threshold_is_clamped() {
    let transactions = vec![expense_in(1, 2024, 1, 5, 45.0, 1)];
    let categories = vec![category(1, "Misc", CategoryKind::Expense)];
    // 20 clamps to 50: 45% used stays Under instead of tripping Warning
    let config = config_with(&[(1, 100.0)], 20.0);

    let report = classify_budgets(&transactions, &categories, &january(), &config);
    assert_eq!(report.lines[0].status, BudgetStatus::Under);
}

#[test]
fn test_default_target_uses_keyword_multiplier_over_history() {
    // Two months of history averaging 150/month; "grocer" multiplier is 1.05
    let transactions = vec![
        expense_in(1, 2024, 1, 5, 100.0, 1),
        expense_in(2, 2024, 2, 5, 200.0, 1),
    ];
    let categories = vec![category(1, "Groceries", CategoryKind::Expense)];

    let report = classify_budgets(
        &transactions,
        &categories,
        &january(),
        &BudgetConfig::default(),
    );
    assert_close(report.lines[0].target_amount, 157.5, "1.05 * mean(100, 200)");
}

#[test]
fn test_default_target_falls_back_without_history() {
    let categories = vec![category(1, "Hobbies", CategoryKind::Expense)];

    let report = classify_budgets(&[], &categories, &january(), &BudgetConfig::default());
    assert_close(
        report.lines[0].target_amount,
        KeywordDefaults::default().fallback_target,
        "flat fallback",
    );
    assert_eq!(report.lines[0].status, BudgetStatus::Under);
}

#[test]
fn test_default_provider_is_pluggable() {
    struct FlatThousand;
    impl BudgetDefaults for FlatThousand {
        fn default_target(&self, _category: &Category, _history: Option<f64>) -> f64 {
            1000.0
        }
    }

    let transactions = vec![expense_in(1, 2024, 1, 5, 100.0, 1)];
    let categories = vec![category(1, "Whatever", CategoryKind::Expense)];

    let report = classify_budgets_with(
        &transactions,
        &categories,
        &january(),
        &BudgetConfig::default(),
        &FlatThousand,
    );
    assert_close(report.lines[0].target_amount, 1000.0, "provider target");
    assert_close(report.lines[0].percent_used, 10.0, "percent of provider target");
}

#[test]
fn test_rollup_figures() {
    let transactions = vec![
        expense_in(1, 2024, 1, 5, 120.0, 1), // 120% of 100: Critical
        expense_in(2, 2024, 1, 6, 80.0, 2),  // 80% of 100: OnTrack at threshold 80
    ];
    let categories = vec![
        category(1, "Dining", CategoryKind::Expense),
        category(2, "Transit", CategoryKind::Expense),
    ];
    let config = config_with(&[(1, 100.0), (2, 100.0)], 80.0);

    let report = classify_budgets(&transactions, &categories, &january(), &config);
    assert_eq!(report.lines[0].status, BudgetStatus::Critical);
    assert_eq!(report.lines[1].status, BudgetStatus::OnTrack);

    // risk mean (10 + 1) / 2 = 5.5 -> health 100 - 55
    assert_close(report.rollup.health_score, 45.0, "health score");
    // One of two lines sits in the 70..=100 band
    assert_close(report.rollup.budget_efficiency, 50.0, "efficiency");
    // Only the critical line exceeds 90% used: 120 * 1.1 - 100
    assert_close(report.rollup.projected_overrun, 32.0, "projected overrun");
}

#[test]
fn test_empty_portfolio_rollup() {
    let report = classify_budgets(&[], &[], &january(), &BudgetConfig::default());
    assert!(report.lines.is_empty());
    assert_close(report.rollup.health_score, 100.0, "no categories, no risk");
    assert_close(report.rollup.budget_efficiency, 0.0, "efficiency");
    assert_close(report.rollup.projected_overrun, 0.0, "overrun");
}
