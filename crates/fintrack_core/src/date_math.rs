//! Calendar arithmetic helpers that bypass jiff's `Span` machinery.
//!
//! jiff `Span` operations are correct but relatively heavy for what the
//! engine needs: clamping a day-of-month, finding the Monday of a week,
//! stepping whole months. The helpers here use Rata Die day-numbering for
//! O(1) day offsets and direct calendar arithmetic for month offsets.

use jiff::civil::Date;

/// Three-letter month abbreviations used by period labels.
pub(crate) const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Fast inline days-in-month calculation without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Clamp a requested day-of-month to the last valid day of that month.
///
/// `clamp_day(2024, 2, 31)` resolves to 29; `clamp_day(2025, 2, 31)` to 28.
/// Pay cycles anchored to day 29-31 rely on this to stay inside short months.
#[inline]
pub fn clamp_day(year: i16, month: i8, day: i8) -> i8 {
    day.clamp(1, days_in_month(year, month))
}

/// Step `(year, month)` forward or backward by `delta` whole months.
#[inline]
pub fn shift_month(year: i16, month: i8, delta: i32) -> (i16, i8) {
    let total = (i32::from(year) * 12 + i32::from(month) - 1) + delta;
    ((total.div_euclid(12)) as i16, (total.rem_euclid(12) + 1) as i8)
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
///
/// Uses the proleptic Gregorian calendar algorithm from Baum (2017).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Add `n` days to a date without going through `jiff::Span`.
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    rd_to_date(rata_die(d) + n)
}

/// Number of days between two dates (`d2 - d1`), positive when `d2 > d1`.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Monday of the week containing `d` (ISO week start).
///
/// Weekly period keys use this date, so lexicographic key order equals
/// chronological order.
#[inline]
pub fn week_start(d: Date) -> Date {
    let offset = i32::from(d.weekday().to_monday_zero_offset());
    add_days(d, -offset)
}

/// Convert a Rata Die day number back to a `jiff::civil::Date`.
#[inline]
fn rd_to_date(rd: i32) -> Date {
    // Shift so day 0 = March 1, year 0
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h / 3_652_425;
    let b = a - a / 4;
    let y = (100 * b + h) / 36_525;
    let c = b + z - 365 * y - y / 4;
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    jiff::civil::date(year as i16, month as i8, day as i8)
}
