//! Integration tests for the analytics engine
//!
//! Tests are organized by engine stage:
//! - `aggregation` - Bucketing, ordering, prefix sums, filters
//! - `statistics` - Descriptive stats, trend labelling, IQR outliers
//! - `anomalies` - Z-score flagging and its dials
//! - `forecasting` - Models, confidence decay, insufficient history
//! - `budgets` - Status classification, default targets, rollups
//! - `health` - Rubric banding and grades
//! - `engine` - Cross-stage pipeline, idempotence, memoization

mod budgets;

use crate::model::{
    Category, CategoryId, CategoryKind, Transaction, TransactionId, TransactionKind,
};

/// Build a transaction for tests.
pub fn tx(
    id: u32,
    year: i16,
    month: i8,
    day: i8,
    kind: TransactionKind,
    amount: f64,
    category: Option<u16>,
) -> Transaction {
    Transaction {
        id: TransactionId(id),
        date: jiff::civil::date(year, month, day),
        kind,
        amount,
        category_id: category.map(CategoryId),
        description: String::new(),
        notes: String::new(),
    }
}

pub fn income(id: u32, year: i16, month: i8, day: i8, amount: f64) -> Transaction {
    tx(id, year, month, day, TransactionKind::Income, amount, None)
}

pub fn expense(id: u32, year: i16, month: i8, day: i8, amount: f64) -> Transaction {
    tx(id, year, month, day, TransactionKind::Expense, amount, None)
}

pub fn expense_in(
    id: u32,
    year: i16,
    month: i8,
    day: i8,
    amount: f64,
    category: u16,
) -> Transaction {
    tx(
        id,
        year,
        month,
        day,
        TransactionKind::Expense,
        amount,
        Some(category),
    )
}

pub fn category(id: u16, name: &str, kind: CategoryKind) -> Category {
    Category {
        id: CategoryId(id),
        name: name.to_string(),
        kind,
        color: String::new(),
        icon: String::new(),
    }
}

/// Absolute-difference float assertion used across the stage tests.
pub fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{context}: expected {expected}, got {actual}"
    );
}
