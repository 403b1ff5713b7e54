//! Transaction bucketing across time granularities
//!
//! Folds a raw transaction list into chronologically ordered
//! [`PeriodBucket`]s. Accumulation happens in an explicit keyed map and the
//! output is sorted afterwards, so bucket order never depends on map
//! iteration order. Everything downstream (statistics, forecasting, anomaly
//! detection) consumes this output.

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_math::{MONTH_ABBREV, week_start};
use crate::model::{
    CategoryId, CategoryTotal, PeriodBucket, Transaction, TransactionKind,
};

/// Time window size for bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    /// Sort key for the period containing `d`.
    ///
    /// Daily uses the ISO date, weekly the ISO date of the week's Monday,
    /// monthly `YYYY-MM`, yearly `YYYY`. All four are zero-padded so
    /// lexicographic order equals chronological order.
    #[must_use]
    pub fn period_key(&self, d: Date) -> String {
        match self {
            Granularity::Daily => format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
            Granularity::Weekly => {
                let monday = week_start(d);
                format!(
                    "{:04}-{:02}-{:02}",
                    monday.year(),
                    monday.month(),
                    monday.day()
                )
            }
            Granularity::Monthly => format!("{:04}-{:02}", d.year(), d.month()),
            Granularity::Yearly => format!("{:04}", d.year()),
        }
    }

    /// Human-readable label for the period containing `d`.
    #[must_use]
    pub fn display_label(&self, d: Date) -> String {
        match self {
            Granularity::Daily => {
                format!("{} {}, {}", MONTH_ABBREV[d.month() as usize - 1], d.day(), d.year())
            }
            Granularity::Weekly => {
                let monday = week_start(d);
                format!(
                    "Week of {} {}, {}",
                    MONTH_ABBREV[monday.month() as usize - 1],
                    monday.day(),
                    monday.year()
                )
            }
            Granularity::Monthly => {
                format!("{} {}", MONTH_ABBREV[d.month() as usize - 1], d.year())
            }
            Granularity::Yearly => format!("{}", d.year()),
        }
    }
}

/// In-flight accumulator for one period. Converted to a `PeriodBucket` once
/// all transactions are folded.
struct BucketAccumulator {
    label: String,
    income: f64,
    expenses: f64,
    count: u32,
    min_amount: f64,
    max_amount: f64,
    breakdown: FxHashMap<CategoryId, CategoryTotal>,
}

impl BucketAccumulator {
    fn new(label: String) -> Self {
        Self {
            label,
            income: 0.0,
            expenses: 0.0,
            count: 0,
            min_amount: f64::INFINITY,
            max_amount: f64::NEG_INFINITY,
            breakdown: FxHashMap::default(),
        }
    }

    fn fold(&mut self, tx: &Transaction) {
        match tx.kind {
            TransactionKind::Income => self.income += tx.amount,
            TransactionKind::Expense => self.expenses += tx.amount,
        }
        self.count += 1;
        self.min_amount = self.min_amount.min(tx.amount);
        self.max_amount = self.max_amount.max(tx.amount);
        if let Some(category_id) = tx.category_id {
            let slot = self.breakdown.entry(category_id).or_default();
            slot.amount += tx.amount;
            slot.count += 1;
        }
    }

    fn into_bucket(self, period_key: String) -> PeriodBucket {
        // An accumulator only exists after at least one fold, so count >= 1
        // and min/max were both set.
        let total = self.income + self.expenses;
        PeriodBucket {
            period_key,
            label: self.label,
            income: self.income,
            expenses: self.expenses,
            net: self.income - self.expenses,
            count: self.count,
            min_transaction: self.min_amount,
            max_transaction: self.max_amount,
            average_transaction: total / f64::from(self.count),
            category_breakdown: self.breakdown,
            cumulative_net: 0.0,
        }
    }
}

/// Bucket `transactions` into chronologically ordered period summaries.
///
/// `category_filter`, when present, is an allow-list: only transactions whose
/// category is in the list are folded (uncategorized ones are excluded).
/// Malformed records are skipped rather than aborting the whole report.
/// Empty input yields an empty vec, not an error.
#[must_use]
pub fn aggregate(
    transactions: &[Transaction],
    granularity: Granularity,
    category_filter: Option<&[CategoryId]>,
) -> Vec<PeriodBucket> {
    let mut accumulators: FxHashMap<String, BucketAccumulator> = FxHashMap::default();
    let mut skipped = 0usize;

    for tx in transactions {
        if !tx.is_well_formed() {
            skipped += 1;
            continue;
        }
        if let Some(allowed) = category_filter {
            match tx.category_id {
                Some(id) if allowed.contains(&id) => {}
                _ => continue,
            }
        }

        let key = granularity.period_key(tx.date);
        accumulators
            .entry(key)
            .or_insert_with(|| BucketAccumulator::new(granularity.display_label(tx.date)))
            .fold(tx);
    }

    if skipped > 0 {
        debug!(skipped, "excluded malformed transactions from aggregation");
    }

    let mut buckets: Vec<PeriodBucket> = accumulators
        .into_iter()
        .map(|(key, acc)| acc.into_bucket(key))
        .collect();
    buckets.sort_by(|a, b| a.period_key.cmp(&b.period_key));

    let mut running = 0.0;
    for bucket in &mut buckets {
        running += bucket.net;
        bucket.cumulative_net = running;
    }

    debug!(
        transactions = transactions.len(),
        buckets = buckets.len(),
        ?granularity,
        "aggregated transaction snapshot"
    );
    buckets
}
