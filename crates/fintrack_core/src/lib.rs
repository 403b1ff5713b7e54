//! Financial analytics engine
//!
//! Pure computations that turn a raw transaction list into period
//! aggregates, trend statistics, multi-model forecasts, anomaly flags,
//! budget-variance classifications, a composite health score and pay-cycle
//! date windows. The surrounding product (stores, routing, rendering,
//! export) supplies input and consumes output; nothing here does I/O.
//!
//! Every function is a deterministic, side-effect-free transform from an
//! input snapshot to a value: calling it twice with the same arguments
//! yields bit-identical output. There is no pipeline object — the caller
//! composes the stages:
//!
//! ```ignore
//! use fintrack_core::aggregate::{Granularity, aggregate};
//! use fintrack_core::forecast::{ForecastConfig, forecast_with};
//! use fintrack_core::model::{BucketMetric, metric_series};
//! use fintrack_core::stats::compute_statistics;
//!
//! let buckets = aggregate(&transactions, Granularity::Monthly, None);
//! let expenses = metric_series(&buckets, BucketMetric::Expenses);
//! let trend = compute_statistics(&expenses);
//! let outlook = forecast_with(&buckets, &ForecastConfig::default());
//! ```
//!
//! Under the default `parallel` feature the independent per-metric and
//! per-category reductions run on rayon; everything else is single-threaded
//! by design.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod anomaly;
pub mod budget;
pub mod date_math;
pub mod error;
pub mod forecast;
pub mod health;
pub mod memo;
pub mod pay_cycle;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::{Granularity, aggregate};
pub use anomaly::{Anomaly, detect_anomalies};
pub use budget::{
    BudgetConfig, BudgetDefaults, KeywordDefaults, PeriodFilter, classify_budgets,
    classify_budgets_with,
};
pub use error::InsufficientData;
pub use forecast::{ForecastConfig, ForecastOutcome, forecast, forecast_with};
pub use health::score_health;
pub use pay_cycle::{PayCycleWindow, compute_pay_cycle};
pub use stats::{
    MetricStatistics, StatisticsConfig, compute_statistics, compute_statistics_all,
    compute_statistics_with,
};
