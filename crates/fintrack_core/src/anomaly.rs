//! Z-score anomaly detection over a metric series
//!
//! Flags values whose distance from the series mean, in standard deviations,
//! exceeds a configurable threshold. This is the distance-based notion of
//! unusual value; the IQR fence count in [`crate::stats`] is the
//! distribution-shape-based one. Both exist in the domain and stay separate.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::stats::{mean, population_std_dev};

/// Valid range for the sigma threshold dial; values outside are clamped.
pub const SIGMA_RANGE: (f64, f64) = (1.0, 3.0);

/// One flagged series entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Index into the input series.
    pub index: usize,
    pub value: f64,
    /// Signed distance from the mean in standard deviations.
    pub z_score: f64,
}

/// Flag entries whose `|value - mean| / std_dev` exceeds `sigma`.
///
/// `sigma` is a user-tunable dial and is clamped to [1, 3] rather than
/// rejected. A series with zero standard deviation reports no anomalies
/// (every value equals the mean, and dividing by zero is never attempted).
///
/// Calibration note: a lone spike in a short series inflates the population
/// standard deviation it is measured against, so its z-score tops out well
/// under 2 (a single spike among n points can never exceed `sqrt(n - 1)`
/// sigma). Thresholds near the low end of [`SIGMA_RANGE`] suit short series.
#[must_use]
pub fn detect_anomalies(series: &[f64], sigma: f64) -> Vec<Anomaly> {
    let sigma = sigma.clamp(SIGMA_RANGE.0, SIGMA_RANGE.1);

    let mean = mean(series);
    let std_dev = population_std_dev(series, mean);
    if std_dev == 0.0 {
        return Vec::new();
    }

    let anomalies: Vec<Anomaly> = series
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z_score = (value - mean) / std_dev;
            (z_score.abs() > sigma).then_some(Anomaly {
                index,
                value,
                z_score,
            })
        })
        .collect();

    trace!(
        points = series.len(),
        sigma,
        flagged = anomalies.len(),
        "z-score anomaly scan"
    );
    anomalies
}
