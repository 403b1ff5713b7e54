//! Period buckets produced by the aggregator
//!
//! A bucket is the aggregate of all transactions falling inside one time
//! granularity window. Buckets are value objects recomputed fresh from the
//! transaction snapshot on every call; nothing here persists between calls.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// Per-category slice of a bucket's spending/income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub amount: f64,
    pub count: u32,
}

/// Aggregate of all transactions within one period window.
///
/// Buckets are produced in strictly ascending chronological order by
/// `period_key`, and `cumulative_net` is a prefix sum over that order:
/// `cumulative_net[i] = cumulative_net[i-1] + net[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Sort key: ISO date (daily/weekly), `YYYY-MM` (monthly) or `YYYY`
    /// (yearly). Lexicographic order equals chronological order.
    pub period_key: String,
    /// Human-readable label for chart axes, e.g. `"Jan 2024"`.
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`.
    pub net: f64,
    /// Number of transactions folded into this bucket. Zero-amount
    /// transactions count here even though they contribute 0 to the sums.
    pub count: u32,
    /// Smallest single transaction magnitude in the bucket.
    pub min_transaction: f64,
    /// Largest single transaction magnitude in the bucket.
    pub max_transaction: f64,
    pub average_transaction: f64,
    pub category_breakdown: FxHashMap<CategoryId, CategoryTotal>,
    pub cumulative_net: f64,
}

/// Selector for one numeric column of a bucket series.
///
/// Statistics, anomaly detection and forecasting all consume a single metric
/// column at a time; this enum keeps the column choice a closed set instead
/// of ad hoc accessor closures scattered across call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketMetric {
    Income,
    Expenses,
    Net,
    Count,
}

impl BucketMetric {
    pub const ALL: [BucketMetric; 4] = [
        BucketMetric::Income,
        BucketMetric::Expenses,
        BucketMetric::Net,
        BucketMetric::Count,
    ];

    /// Extract this metric's value from a single bucket.
    #[must_use]
    pub fn extract(&self, bucket: &PeriodBucket) -> f64 {
        match self {
            BucketMetric::Income => bucket.income,
            BucketMetric::Expenses => bucket.expenses,
            BucketMetric::Net => bucket.net,
            BucketMetric::Count => f64::from(bucket.count),
        }
    }
}

/// Extract one metric column from an ordered bucket series.
#[must_use]
pub fn metric_series(buckets: &[PeriodBucket], metric: BucketMetric) -> Vec<f64> {
    buckets.iter().map(|b| metric.extract(b)).collect()
}
