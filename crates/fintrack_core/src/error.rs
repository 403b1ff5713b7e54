use std::fmt;

use serde::{Deserialize, Serialize};

/// Signal that a computation was handed fewer data points than it needs.
///
/// This is a recoverable condition, not a failure: callers render an empty
/// state and retry once more history exists. Out-of-range tunables (sigma,
/// warning threshold, pay-cycle start day) are clamped rather than reported,
/// and degenerate arithmetic is guarded to produce 0 — so this is the only
/// error-shaped value the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientData {
    /// Minimum number of points the computation needs.
    pub needed: usize,
    /// Number of points actually supplied.
    pub actual: usize,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient data: need at least {} points, got {}",
            self.needed, self.actual
        )
    }
}

impl std::error::Error for InsufficientData {}
