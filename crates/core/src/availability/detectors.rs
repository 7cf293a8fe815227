//! The six conflict detectors
//!
//! Each detector is a pure function over the constraint snapshot the
//! orchestrator prefetched, returning zero or more typed conflicts. The
//! orchestrator always runs all six — no short-circuiting — so a rejected
//! slot surfaces the complete set of violated constraints.
//!
//! Known limitation, preserved deliberately: the working-hours and override
//! checks compare times of day, so a slot spanning midnight is validated
//! against the start date's window only; the continuation into the next day
//! is not checked.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use slotwise_domain::{
    AvailabilityRule, Booking, BufferSide, Conflict, ConflictKind, DateOverride,
    ExternalBusyInterval, WorkingHoursConfig,
};

use super::interval::{expand, overlaps, week_bounds};

/// 1. Working hours: the slot must fall inside the weekday's enabled window.
///
/// No config means no constraint (fail-open).
pub fn check_working_hours(
    config: Option<&WorkingHoursConfig>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Vec<Conflict> {
    let Some(config) = config else {
        return Vec::new();
    };

    let weekday = date.weekday();
    let day = config.day(weekday);

    if !day.enabled {
        return vec![Conflict::new(
            ConflictKind::WorkingHours,
            format!("Member is not available on {}s", weekday_name(weekday)),
        )];
    }

    if start_time < day.start || end_time > day.end {
        return vec![Conflict::new(
            ConflictKind::WorkingHours,
            format!(
                "Time is outside working hours ({} - {})",
                day.start.format("%H:%M"),
                day.end.format("%H:%M")
            ),
        )];
    }

    Vec::new()
}

/// 2. Date override: a blocked date always conflicts; custom hours replace
/// the weekday window for the containment check.
pub fn check_date_override(
    date_override: Option<&DateOverride>,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Vec<Conflict> {
    let Some(date_override) = date_override else {
        return Vec::new();
    };

    if !date_override.available {
        let reason = date_override
            .reason
            .clone()
            .unwrap_or_else(|| "Member is not available on this date".to_string());
        return vec![Conflict::new(ConflictKind::DateOverride, reason)];
    }

    if let Some((custom_start, custom_end)) = date_override.custom_window() {
        if start_time < custom_start || end_time > custom_end {
            return vec![Conflict::new(
                ConflictKind::DateOverride,
                format!(
                    "Time is outside custom hours for this date ({} - {})",
                    custom_start.format("%H:%M"),
                    custom_end.format("%H:%M")
                ),
            )];
        }
    }

    Vec::new()
}

/// 3. Booking conflicts: one conflict per busy booking overlapping the
/// proposed window.
pub fn check_booking_conflicts(
    bookings: &[Booking],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_booking_id: Option<&str>,
) -> Vec<Conflict> {
    bookings
        .iter()
        .filter(|b| b.status.is_busy() && !is_excluded(b, exclude_booking_id))
        .filter(|b| overlaps(b.start, b.end, start, end))
        .map(|b| {
            Conflict::with_related(
                ConflictKind::BookingConflict,
                format!(
                    "Conflicts with existing booking {} ({} - {})",
                    b.id,
                    b.start.format("%H:%M"),
                    b.end.format("%H:%M")
                ),
                b.id.clone(),
            )
        })
        .collect()
}

/// 4. Calendar events: one conflict per overlapping synced blocking interval.
///
/// Records that never finished syncing, or whose sync failed, are skipped by
/// [`ExternalBusyInterval::blocks_slots`]; all-day events are handled as
/// whole-day unavailability outside this detector.
pub fn check_calendar_events(
    intervals: &[ExternalBusyInterval],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Conflict> {
    intervals
        .iter()
        .filter(|event| event.blocks_slots())
        .filter(|event| overlaps(event.start, event.end, start, end))
        .map(|event| {
            Conflict::with_related(
                ConflictKind::CalendarEvent,
                format!(
                    "Conflicts with calendar event: {} ({} - {})",
                    event.display_title(),
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M")
                ),
                event.id.clone(),
            )
        })
        .collect()
}

/// 5. Buffer times: bookings too close to the proposed window.
///
/// Each neighboring busy booking must keep its required gap to the proposed
/// slot: `buffer_after` free minutes following a booking that ends before the
/// slot, `buffer_before` free minutes preceding a booking that starts after
/// it. Every violating neighbor yields exactly one conflict, independently of
/// any other neighbor. Direct overlaps with the proposed window belong to
/// detector 3, and a rule without buffers makes this a no-op.
pub fn check_buffer_times(
    rule: &AvailabilityRule,
    bookings: &[Booking],
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_booking_id: Option<&str>,
) -> Vec<Conflict> {
    let before = rule.buffer_before_minutes;
    let after = rule.buffer_after_minutes;

    if before == 0 && after == 0 {
        return Vec::new();
    }

    // The zone preceding the slot is sized by the gap owed to an earlier
    // neighbor (buffer_after), the zone following it by the gap owed to a
    // later one (buffer_before).
    let (buffer_start, buffer_end) = expand(start, end, after, before);

    let mut conflicts = Vec::new();
    for booking in bookings {
        if !booking.status.is_busy() || is_excluded(booking, exclude_booking_id) {
            continue;
        }
        // Direct overlaps with the proposed window are detector 3's domain
        if overlaps(booking.start, booking.end, start, end) {
            continue;
        }

        if booking.end > buffer_start && booking.end <= start {
            conflicts.push(buffer_conflict(BufferSide::After, after, booking));
        } else if booking.start < buffer_end && booking.start >= end {
            conflicts.push(buffer_conflict(BufferSide::Before, before, booking));
        }
    }

    conflicts
}

/// 6. Quotas: daily and ISO-week busy-booking caps.
///
/// The weekly window is the calendar week (Monday..Sunday) containing the
/// date, not a rolling seven days.
pub fn check_quotas(
    rule: &AvailabilityRule,
    bookings: &[Booking],
    date: NaiveDate,
    exclude_booking_id: Option<&str>,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    let busy = |b: &&Booking| b.status.is_busy() && !is_excluded(b, exclude_booking_id);

    if rule.max_per_day > 0 {
        let day_count = bookings.iter().filter(busy).filter(|b| b.start.date() == date).count();
        if day_count >= rule.max_per_day as usize {
            conflicts.push(Conflict::new(
                ConflictKind::QuotaExceeded,
                format!("Member has reached maximum bookings per day ({})", rule.max_per_day),
            ));
        }
    }

    if rule.max_per_week > 0 {
        let (week_start, week_end) = week_bounds(date);
        let week_count = bookings
            .iter()
            .filter(busy)
            .filter(|b| b.start.date() >= week_start && b.start.date() <= week_end)
            .count();
        if week_count >= rule.max_per_week as usize {
            conflicts.push(Conflict::new(
                ConflictKind::QuotaExceeded,
                format!("Member has reached maximum bookings per week ({})", rule.max_per_week),
            ));
        }
    }

    conflicts
}

fn buffer_conflict(side: BufferSide, minutes: u32, booking: &Booking) -> Conflict {
    Conflict::with_related(
        ConflictKind::BufferTime,
        format!("Violates {minutes}-minute buffer {side} booking {}", booking.id),
        booking.id.clone(),
    )
}

fn is_excluded(booking: &Booking, exclude_booking_id: Option<&str>) -> bool {
    exclude_booking_id.is_some_and(|id| id == booking.id)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
