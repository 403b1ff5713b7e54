//! Descriptive statistics over a bucket metric series
//!
//! [`TrendStats`] is derived and immutable: it is recomputed wholesale from
//! the input series on each call, never mutated incrementally.

use serde::{Deserialize, Serialize};

/// Direction of the least-squares trend line through a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Descriptive statistics and trend/consistency metrics for one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    pub average: f64,
    /// Nearest-rank quantiles over the sorted copy of the series
    /// (floor index at `n * p`).
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub volatility: f64,
    /// Least-squares slope over the index sequence `1..=n` versus values.
    pub trend_slope: f64,
    pub trend: TrendDirection,
    /// `(last - first) / first * 100`; 0 when the first value is 0.
    pub growth_rate: f64,
    /// `max(0, 100 - coefficient_of_variation * 100)`.
    pub consistency_score: f64,
    /// Count of values outside the `[q1 - 1.5*iqr, q3 + 1.5*iqr]` fence.
    /// This is the IQR notion of outlier, distinct from z-score anomalies.
    pub outlier_count: usize,
}
