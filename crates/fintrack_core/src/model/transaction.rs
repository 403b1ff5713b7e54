//! Transaction and category records supplied by the hosting application
//!
//! The engine treats both as read-only input. Direction of money flow is
//! derived solely from [`TransactionKind`], never from the sign of `amount`.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TransactionId};

/// Direction of a transaction. Amounts are always stored as non-negative
/// magnitudes; this tag decides which side of the ledger they land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single ledger entry as captured by the transaction store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: Date,
    pub kind: TransactionKind,
    /// Non-negative magnitude. Records violating this are treated as
    /// malformed and skipped by the aggregator rather than aborting the run.
    pub amount: f64,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub notes: String,
}

impl Transaction {
    /// Whether this record is well-formed enough to aggregate.
    ///
    /// A malformed record (negative or non-finite amount) is excluded from
    /// computation so one bad row cannot corrupt the whole report.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.amount.is_finite() && self.amount >= 0.0
    }
}

/// Category kind mirrors [`TransactionKind`]: a category collects either
/// income or expense entries, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    Income,
    Expense,
}

/// A category as captured by the category store. Read-only to the engine;
/// `color` and `icon` pass through untouched for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
    pub icon: String,
}
