//! Rubric-based composite financial health score
//!
//! The rubric is a fixed step function over banded thresholds, scored the
//! way the product's help text describes it. It must stay a step function:
//! smoothing it into a continuous formula changes scores users have already
//! seen.

use tracing::trace;

use crate::model::{HealthGrade, HealthScore, TrendStats};

/// `(minimum savings rate %, points)` — first band at or below the rate wins.
const SAVINGS_BANDS: [(f64, u8); 6] = [
    (30.0, 50),
    (20.0, 45),
    (15.0, 40),
    (10.0, 30),
    (5.0, 20),
    (0.0, 10),
];

/// `(maximum expense ratio %, points)`.
const EXPENSE_BANDS: [(f64, u8); 5] = [
    (50.0, 25),
    (70.0, 20),
    (80.0, 15),
    (90.0, 10),
    (100.0, 5),
];

/// `(minimum transaction count, points)`.
const ACTIVITY_BANDS: [(usize, u8); 4] = [(20, 10), (10, 8), (5, 6), (1, 4)];

/// Score aggregate income/expense/activity figures against the rubric.
///
/// 100 points total: savings rate 50, expense ratio 25, stability 15
/// (+10 for any income, +5 for any transactions), activity 10. With zero
/// income the savings rate is defined as 0 (worth its >= 0% band) and the
/// expense ratio as worst-band whenever anything was spent.
#[must_use]
pub fn score_health(
    income: f64,
    expenses: f64,
    trend: &TrendStats,
    transaction_count: usize,
) -> HealthScore {
    let savings_rate = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };
    let savings_score = SAVINGS_BANDS
        .iter()
        .find(|(min_rate, _)| savings_rate >= *min_rate)
        .map_or(0, |(_, points)| *points);

    let expense_ratio = if income > 0.0 {
        Some(expenses / income * 100.0)
    } else if expenses > 0.0 {
        None // spending with no income: beyond every band
    } else {
        Some(0.0)
    };
    let expense_score = expense_ratio.map_or(0, |ratio| {
        EXPENSE_BANDS
            .iter()
            .find(|(max_ratio, _)| ratio <= *max_ratio)
            .map_or(0, |(_, points)| *points)
    });

    let mut stability_score = 0;
    if income > 0.0 {
        stability_score += 10;
    }
    if transaction_count > 0 {
        stability_score += 5;
    }

    let activity_score = ACTIVITY_BANDS
        .iter()
        .find(|(min_count, _)| transaction_count >= *min_count)
        .map_or(0, |(_, points)| *points);

    let total = savings_score + expense_score + stability_score + activity_score;
    let grade = grade_for(total);

    trace!(
        total,
        ?grade,
        trend = ?trend.trend,
        "scored financial health"
    );

    HealthScore {
        savings_score,
        expense_score,
        stability_score,
        activity_score,
        total,
        grade,
    }
}

/// Letter grade bands over the composite total.
#[must_use]
pub fn grade_for(total: u8) -> HealthGrade {
    match total {
        85.. => HealthGrade::A,
        70..=84 => HealthGrade::B,
        55..=69 => HealthGrade::C,
        40..=54 => HealthGrade::D,
        _ => HealthGrade::F,
    }
}
