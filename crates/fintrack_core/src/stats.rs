//! Descriptive statistics and trend metrics over a metric series
//!
//! All quantities are recomputed wholesale from the input series; there is no
//! incremental state. Degenerate inputs (empty series, zero mean, zero first
//! value) are guarded to produce 0 rather than NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::model::{BucketMetric, PeriodBucket, TrendDirection, TrendStats, metric_series};

/// Tunables for trend labelling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Slopes within `±trend_epsilon` are labelled `Stable`.
    pub trend_epsilon: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self { trend_epsilon: 0.1 }
    }
}

/// Arithmetic mean; 0 for an empty series.
#[must_use]
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.iter().sum::<f64>() / series.len() as f64
    }
}

/// Population standard deviation around a precomputed mean.
pub(crate) fn population_std_dev(series: &[f64], mean: f64) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let variance =
        series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / series.len() as f64;
    variance.sqrt()
}

/// Nearest-rank quantile over an already-sorted slice: the element at floor
/// index `n * p`, clamped to the last element.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Least-squares slope of `series` against the index sequence `1..=n`.
///
/// `slope = (n*Σxy - Σx*Σy) / (n*Σx² - (Σx)²)`. Series shorter than 2 points
/// have no trend and return 0.
fn least_squares_slope(series: &[f64]) -> f64 {
    let n = series.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denom = n_f * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        0.0
    } else {
        (n_f * sum_xy - sum_x * sum_y) / denom
    }
}

/// Compute [`TrendStats`] for one metric series with default tunables.
#[must_use]
pub fn compute_statistics(series: &[f64]) -> TrendStats {
    compute_statistics_with(series, &StatisticsConfig::default())
}

/// Compute [`TrendStats`] for one metric series.
///
/// Quantiles use the nearest-rank method (floor index at `n * p`) over a
/// sorted copy. Volatility is the population standard deviation. Growth rate
/// compares first and last values and is 0 when the first value is 0.
#[must_use]
pub fn compute_statistics_with(series: &[f64], config: &StatisticsConfig) -> TrendStats {
    if series.is_empty() {
        return TrendStats::default();
    }

    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);

    let average = mean(series);
    let median = quantile_sorted(&sorted, 0.50);
    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let volatility = population_std_dev(series, average);

    let trend_slope = least_squares_slope(series);
    let trend = if trend_slope > config.trend_epsilon {
        TrendDirection::Increasing
    } else if trend_slope < -config.trend_epsilon {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let first = series[0];
    let last = series[series.len() - 1];
    let growth_rate = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };

    let coefficient_of_variation = if average == 0.0 {
        0.0
    } else {
        volatility / average
    };
    let consistency_score = (100.0 - coefficient_of_variation * 100.0).max(0.0);

    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;
    let outlier_count = series
        .iter()
        .filter(|&&v| v < low_fence || v > high_fence)
        .count();

    TrendStats {
        average,
        median,
        q1,
        q3,
        iqr,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        volatility,
        trend_slope,
        trend,
        growth_rate,
        consistency_score,
        outlier_count,
    }
}

/// Per-metric statistics for a whole bucket series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStatistics {
    pub income: TrendStats,
    pub expenses: TrendStats,
    pub net: TrendStats,
    pub count: TrendStats,
}

/// Compute statistics for every bucket metric column at once.
///
/// The four reductions are data-independent, so under the `parallel` feature
/// they run concurrently. This is the only concurrency in the engine.
#[must_use]
pub fn compute_statistics_all(buckets: &[PeriodBucket]) -> MetricStatistics {
    let income = metric_series(buckets, BucketMetric::Income);
    let expenses = metric_series(buckets, BucketMetric::Expenses);
    let net = metric_series(buckets, BucketMetric::Net);
    let count = metric_series(buckets, BucketMetric::Count);

    #[cfg(feature = "parallel")]
    let ((income, expenses), (net, count)) = rayon::join(
        || {
            rayon::join(
                || compute_statistics(&income),
                || compute_statistics(&expenses),
            )
        },
        || rayon::join(|| compute_statistics(&net), || compute_statistics(&count)),
    );

    #[cfg(not(feature = "parallel"))]
    let (income, expenses, net, count) = (
        compute_statistics(&income),
        compute_statistics(&expenses),
        compute_statistics(&net),
        compute_statistics(&count),
    );

    MetricStatistics {
        income,
        expenses,
        net,
        count,
    }
}
