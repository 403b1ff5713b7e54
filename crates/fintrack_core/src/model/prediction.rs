//! Forecast output types

use serde::{Deserialize, Serialize};

/// Forecasting strategy.
///
/// `Polynomial` is a second-degree heuristic (a quadratic term layered on the
/// dampened trend factor), not a trained model; the product labels it
/// "ML-Enhanced" but no machine learning is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastModel {
    Linear,
    Exponential,
    Seasonal,
    Polynomial,
}

/// One projected future period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Period key of the projected window, continuing the historical key
    /// sequence (`YYYY-MM` after monthly buckets, and so on).
    pub period_key: String,
    pub predicted_income: f64,
    pub predicted_expenses: f64,
    /// `predicted_income - predicted_expenses`.
    pub predicted_net: f64,
    /// In `(0, 1]`, monotonically non-increasing with horizon distance,
    /// floored at 0.4.
    pub confidence: f64,
    pub model: ForecastModel,
}
