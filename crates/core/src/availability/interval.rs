//! Interval arithmetic over half-open time windows
//!
//! Every window in the engine is half-open (`[start, end)`): meetings that
//! touch end-to-start do not conflict. Pure functions, no I/O; callers reject
//! zero-duration windows before reaching this layer.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Whether two half-open windows overlap.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Widen a window by minute counts on each side.
pub fn expand(
    start: NaiveDateTime,
    end: NaiveDateTime,
    before_minutes: u32,
    after_minutes: u32,
) -> (NaiveDateTime, NaiveDateTime) {
    (
        start - Duration::minutes(i64::from(before_minutes)),
        end + Duration::minutes(i64::from(after_minutes)),
    )
}

/// The ISO calendar week containing `date`: `[Monday, Sunday]`.
///
/// Weekly quotas are calendar-week based, not a rolling seven days.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}
