//! Multi-model projection of future period buckets
//!
//! Every model shares the same skeleton: project the historical average
//! income/expenses forward, scaled by the historical trend growth rate with a
//! `0.95^i` dampening factor so later horizons regress toward the average
//! instead of compounding forever. Confidence decays linearly with horizon
//! distance and is floored at 0.4.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_math::{add_days, days_between, shift_month};
use crate::error::InsufficientData;
use crate::model::{BucketMetric, ForecastModel, PeriodBucket, Prediction, metric_series};
use crate::stats::mean;

/// Minimum history length for any projection.
pub const MIN_FORECAST_HISTORY: usize = 3;

/// Per-horizon trend dampening base.
const DAMPENING_BASE: f64 = 0.95;

/// Curvature of the `Polynomial` model's quadratic term. The model is a
/// second-degree heuristic, not a trained one.
const POLY_CURVATURE: f64 = 0.002;

/// Forecast request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub model: ForecastModel,
    /// Number of future periods to project.
    pub horizon: usize,
    /// Whether the `Seasonal` model applies its monthly modulation; other
    /// models ignore this flag.
    pub seasonality: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model: ForecastModel::Linear,
            horizon: 6,
            seasonality: false,
        }
    }
}

/// Result of a forecast request.
///
/// Too little history is an expected condition, not an error: callers render
/// an empty state from `InsufficientHistory` and retry once more periods
/// exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForecastOutcome {
    Projected(Vec<Prediction>),
    InsufficientHistory(InsufficientData),
}

impl ForecastOutcome {
    /// Predictions, empty when history was insufficient.
    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        match self {
            ForecastOutcome::Projected(predictions) => predictions,
            ForecastOutcome::InsufficientHistory(_) => &[],
        }
    }

    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        matches!(self, ForecastOutcome::InsufficientHistory(_))
    }
}

/// Continues the historical period-key sequence into the future.
///
/// The key shape is inferred from the buckets themselves: `YYYY` steps years,
/// `YYYY-MM` steps months, ISO dates step by the stride between the last two
/// historical buckets (7 for weekly series, 1 for daily). Keys the engine
/// cannot parse degrade to `"<last>+i"` suffix keys rather than failing.
enum KeyCursor {
    Yearly { year: i16 },
    Monthly { year: i16, month: i8 },
    Dated { date: Date, stride_days: i32 },
    Opaque { base: String },
}

impl KeyCursor {
    fn from_buckets(buckets: &[PeriodBucket]) -> Self {
        let last = &buckets[buckets.len() - 1].period_key;
        match last.len() {
            4 => {
                if let Ok(year) = last.parse::<i16>() {
                    return KeyCursor::Yearly { year };
                }
            }
            7 => {
                // Checked slicing: a 7-byte key is not necessarily ASCII,
                // and an unparseable key must degrade, not panic.
                let year = last.get(0..4).and_then(|s| s.parse::<i16>().ok());
                let month = last.get(5..7).and_then(|s| s.parse::<i8>().ok());
                if let (Some(year), Some(month)) = (year, month)
                    && (1..=12).contains(&month)
                {
                    return KeyCursor::Monthly { year, month };
                }
            }
            10 => {
                if let Some(date) = parse_iso_date(last) {
                    let stride_days = buckets
                        .get(buckets.len().wrapping_sub(2))
                        .and_then(|prev| parse_iso_date(&prev.period_key))
                        .map(|prev| days_between(prev, date).max(1))
                        .unwrap_or(1);
                    return KeyCursor::Dated { date, stride_days };
                }
            }
            _ => {}
        }
        KeyCursor::Opaque { base: last.clone() }
    }

    /// Key of the `i`-th future period (1-indexed) and its calendar month,
    /// or 0 when no calendar month applies.
    fn key_for(&self, i: usize) -> (String, i8) {
        match self {
            KeyCursor::Yearly { year } => {
                let year = year + i as i16;
                (format!("{year:04}"), 0)
            }
            KeyCursor::Monthly { year, month } => {
                let (y, m) = shift_month(*year, *month, i as i32);
                (format!("{y:04}-{m:02}"), m)
            }
            KeyCursor::Dated { date, stride_days } => {
                let d = add_days(*date, stride_days * i as i32);
                (
                    format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
                    d.month(),
                )
            }
            KeyCursor::Opaque { base } => (format!("{base}+{i}"), 0),
        }
    }
}

fn parse_iso_date(key: &str) -> Option<Date> {
    let year = key.get(0..4)?.parse::<i16>().ok()?;
    let month = key.get(5..7)?.parse::<i8>().ok()?;
    let day = key.get(8..10)?.parse::<i8>().ok()?;
    Date::new(year, month, day).ok()
}

/// Growth rate of a series in percent, 0 when the first value is 0.
fn trend_growth_pct(series: &[f64]) -> f64 {
    let first = series[0];
    let last = series[series.len() - 1];
    if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    }
}

/// Project one metric `i` periods ahead under the chosen model.
///
/// `month` is the calendar month of the projected period (0 when the series
/// has no calendar month, in which case the seasonal phase falls back to the
/// horizon index).
fn project(
    model: ForecastModel,
    avg: f64,
    trend_pct: f64,
    i: usize,
    month: i8,
    seasonality: bool,
) -> f64 {
    let i_f = i as f64;
    // i * 0.95^i rises over near horizons, then decays back toward the
    // historical average for distant ones.
    let dampened = i_f * DAMPENING_BASE.powi(i as i32);
    let trend_fraction = trend_pct / 100.0;

    let projected = match model {
        ForecastModel::Linear | ForecastModel::Seasonal => {
            avg * (1.0 + trend_fraction * dampened)
        }
        ForecastModel::Exponential => {
            // A trend below -100% would make the base negative and powf
            // would return NaN; floor the base at 0 instead.
            avg * (1.0 + trend_fraction).max(0.0).powf(i_f * 0.5)
        }
        ForecastModel::Polynomial => {
            avg * (1.0 + trend_fraction * dampened + POLY_CURVATURE * (i_f - 1.0).powi(2))
        }
    };

    let projected = if model == ForecastModel::Seasonal && seasonality {
        let phase = if month == 0 {
            (i % 12) as f64
        } else {
            f64::from(month)
        };
        projected * (1.0 + 0.1 * (std::f64::consts::TAU * phase / 12.0).sin())
    } else {
        projected
    };

    // Income and expenses are magnitudes; a strongly negative trend must not
    // project below zero.
    projected.max(0.0)
}

/// Project `horizon` future periods from historical buckets.
///
/// Buckets must be in chronological order (the aggregator's output already
/// is). Fewer than [`MIN_FORECAST_HISTORY`] buckets yields
/// [`ForecastOutcome::InsufficientHistory`] rather than an error.
#[must_use]
pub fn forecast(
    buckets: &[PeriodBucket],
    model: ForecastModel,
    horizon: usize,
    seasonality: bool,
) -> ForecastOutcome {
    if buckets.len() < MIN_FORECAST_HISTORY {
        debug!(
            buckets = buckets.len(),
            needed = MIN_FORECAST_HISTORY,
            "not enough history to forecast"
        );
        return ForecastOutcome::InsufficientHistory(InsufficientData {
            needed: MIN_FORECAST_HISTORY,
            actual: buckets.len(),
        });
    }

    let income_series = metric_series(buckets, BucketMetric::Income);
    let expense_series = metric_series(buckets, BucketMetric::Expenses);
    let avg_income = mean(&income_series);
    let avg_expenses = mean(&expense_series);
    let income_trend_pct = trend_growth_pct(&income_series);
    let expense_trend_pct = trend_growth_pct(&expense_series);

    let cursor = KeyCursor::from_buckets(buckets);
    let mut predictions = Vec::with_capacity(horizon);
    for i in 1..=horizon {
        let (period_key, month) = cursor.key_for(i);
        let predicted_income = project(model, avg_income, income_trend_pct, i, month, seasonality);
        let predicted_expenses =
            project(model, avg_expenses, expense_trend_pct, i, month, seasonality);

        predictions.push(Prediction {
            period_key,
            predicted_income,
            predicted_expenses,
            predicted_net: predicted_income - predicted_expenses,
            confidence: (1.0 - i as f64 * 0.08).max(0.4),
            model,
        });
    }

    debug!(
        history = buckets.len(),
        horizon,
        ?model,
        "projected future periods"
    );
    ForecastOutcome::Projected(predictions)
}

/// [`forecast`] with parameters carried in a [`ForecastConfig`].
#[must_use]
pub fn forecast_with(buckets: &[PeriodBucket], config: &ForecastConfig) -> ForecastOutcome {
    forecast(buckets, config.model, config.horizon, config.seasonality)
}
