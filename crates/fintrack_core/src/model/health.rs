//! Composite financial health score

use serde::{Deserialize, Serialize};

/// Letter grade derived from banding the composite score:
/// `A >= 85`, `B >= 70`, `C >= 55`, `D >= 40`, else `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthGrade {
    A,
    B,
    C,
    D,
    F,
}

/// Rubric-based composite score out of 100.
///
/// Components are banded step functions, never continuous formulas:
/// savings rate (50 pts), expense ratio (25 pts), stability (15 pts),
/// activity (10 pts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub savings_score: u8,
    pub expense_score: u8,
    pub stability_score: u8,
    pub activity_score: u8,
    pub total: u8,
    pub grade: HealthGrade,
}
