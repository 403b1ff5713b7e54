//! Pay-cycle date windows
//!
//! A pay cycle is a recurring window anchored to a configurable day-of-month,
//! used as an alternative to calendar months by people paid mid-month. The
//! window containing a reference date runs from the anchor day of the current
//! or previous month up to the instant before the next cycle starts.

use jiff::civil::{Date, DateTime, date};
use serde::{Deserialize, Serialize};

use crate::date_math::{MONTH_ABBREV, add_days, clamp_day, shift_month};

/// One pay-cycle window. `start` is inclusive at 00:00:00.000 and `end` is
/// inclusive at 23:59:59.999, so consecutive windows tile the calendar with
/// no gap and no overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCycleWindow {
    pub start: DateTime,
    pub end: DateTime,
    /// Human-readable `"Mon D – Mon D, YYYY"` range.
    pub label: String,
}

/// Resolve the pay cycle containing `reference`.
///
/// `start_day` is clamped to 1..=31, then resolved to the last valid day of
/// any month shorter than it (a cycle anchored on the 31st starts on Feb 28
/// or 29). If the reference date falls on or after the anchor day of its own
/// month the cycle starts this month; otherwise it started last month.
#[must_use]
pub fn compute_pay_cycle(reference: Date, start_day: i8) -> PayCycleWindow {
    let start_day = start_day.clamp(1, 31);

    let anchor_this_month = clamp_day(reference.year(), reference.month(), start_day);
    let (start_year, start_month) = if reference.day() >= anchor_this_month {
        (reference.year(), reference.month())
    } else {
        shift_month(reference.year(), reference.month(), -1)
    };

    let start = date(
        start_year,
        start_month,
        clamp_day(start_year, start_month, start_day),
    );

    // End is the day before the following cycle's anchor.
    let (next_year, next_month) = shift_month(start_year, start_month, 1);
    let next_start = date(next_year, next_month, clamp_day(next_year, next_month, start_day));
    let end = add_days(next_start, -1);

    PayCycleWindow {
        start: start.at(0, 0, 0, 0),
        end: end.at(23, 59, 59, 999_000_000),
        label: cycle_label(start, end),
    }
}

fn cycle_label(start: Date, end: Date) -> String {
    format!(
        "{} {} – {} {}, {}",
        MONTH_ABBREV[start.month() as usize - 1],
        start.day(),
        MONTH_ABBREV[end.month() as usize - 1],
        end.day(),
        end.year()
    )
}
