//! Availability orchestrator - core business logic

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_domain::{AvailabilityResult, AvailabilityRule, Result, SlotwiseError};
use tracing::debug;

use super::detectors::{
    check_booking_conflicts, check_buffer_times, check_calendar_events, check_date_override,
    check_quotas, check_working_hours,
};
use super::interval::week_bounds;
use super::ports::{BookingRepository, BusyIntervalRepository, RuleRepository, ScheduleRepository};

/// Availability checking service.
///
/// A pure read layer: each check takes one snapshot of the member's
/// constraints through the ports, runs all six detectors in a fixed order and
/// aggregates the conflicts. Deterministic for identical inputs and safe to
/// call concurrently for any number of members.
pub struct AvailabilityService {
    schedules: Arc<dyn ScheduleRepository>,
    rules: Arc<dyn RuleRepository>,
    bookings: Arc<dyn BookingRepository>,
    busy_intervals: Arc<dyn BusyIntervalRepository>,
}

impl AvailabilityService {
    /// Create a new availability service
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        rules: Arc<dyn RuleRepository>,
        bookings: Arc<dyn BookingRepository>,
        busy_intervals: Arc<dyn BusyIntervalRepository>,
    ) -> Self {
        Self { schedules, rules, bookings, busy_intervals }
    }

    /// Decide whether the member is free for the proposed slot.
    ///
    /// All detectors run unconditionally so the result carries the complete
    /// set of violated constraints, not just the first one. Set
    /// `exclude_booking_id` when re-validating an in-place reschedule so the
    /// booking being moved does not conflict with itself.
    ///
    /// Inputs are department-local; timezone normalization happens before the
    /// engine is called.
    pub async fn check_availability(
        &self,
        member_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: u32,
        exclude_booking_id: Option<&str>,
    ) -> Result<AvailabilityResult> {
        if duration_minutes == 0 {
            return Err(SlotwiseError::InvalidInput("Duration must be positive".into()));
        }

        let start = date.and_time(start_time);
        let end = start + Duration::minutes(i64::from(duration_minutes));
        let end_time = end.time();

        let working_hours = self.schedules.get_working_hours(member_id).await?;
        let date_override = self.schedules.get_date_override(member_id, date).await?;
        let rule = self
            .rules
            .get_availability_rule(member_id)
            .await?
            .unwrap_or_else(AvailabilityRule::permissive);

        // One fetch window feeds the overlap, buffer and quota detectors: the
        // ISO week (for the weekly cap) widened by a day on each side, which
        // comfortably covers the 4-hour buffer maximum.
        let (week_start, week_end) = week_bounds(date);
        let window_from = (week_start - Duration::days(1)).and_time(NaiveTime::MIN);
        let window_to =
            (week_end.max(end.date()) + Duration::days(2)).and_time(NaiveTime::MIN);
        let bookings =
            self.bookings.get_bookings_in_range(member_id, window_from, window_to).await?;
        let busy_intervals =
            self.busy_intervals.get_busy_intervals(member_id, window_from, window_to).await?;

        let mut conflicts = Vec::new();
        conflicts.extend(check_working_hours(working_hours.as_ref(), date, start_time, end_time));
        conflicts.extend(check_date_override(date_override.as_ref(), start_time, end_time));
        conflicts.extend(check_booking_conflicts(&bookings, start, end, exclude_booking_id));
        conflicts.extend(check_calendar_events(&busy_intervals, start, end));
        conflicts.extend(check_buffer_times(&rule, &bookings, start, end, exclude_booking_id));
        conflicts.extend(check_quotas(&rule, &bookings, date, exclude_booking_id));

        debug!(member_id, %date, %start_time, duration_minutes, conflict_count = conflicts.len(), "availability check complete");

        Ok(AvailabilityResult::from_conflicts(conflicts))
    }

    /// Check the member's minimum-notice requirement for a slot start.
    ///
    /// Returns the human-readable violation when the slot begins too soon, or
    /// `None` when the slot is fine or no rule is configured. `now` is passed
    /// explicitly so callers control the clock.
    pub async fn validate_minimum_notice(
        &self,
        member_id: &str,
        slot_start: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<Option<String>> {
        let Some(rule) = self.rules.get_availability_rule(member_id).await? else {
            return Ok(None);
        };
        if rule.min_notice_hours == 0 {
            return Ok(None);
        }

        let min_allowed = now + Duration::hours(i64::from(rule.min_notice_hours));
        if slot_start < min_allowed {
            return Ok(Some(format!(
                "Booking requires at least {} hours notice",
                rule.min_notice_hours
            )));
        }
        Ok(None)
    }

    /// Check the member's advance-booking window for a date.
    ///
    /// Returns the violation when the date lies beyond the member's maximum
    /// advance, or `None` when the date is fine or no rule is configured.
    pub async fn validate_advance_window(
        &self,
        member_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Option<String>> {
        let Some(rule) = self.rules.get_availability_rule(member_id).await? else {
            return Ok(None);
        };
        if rule.max_advance_days == 0 {
            return Ok(None);
        }

        let max_allowed = today + Duration::days(i64::from(rule.max_advance_days));
        if date > max_allowed {
            return Ok(Some(format!(
                "Booking is too far in advance (maximum {} days)",
                rule.max_advance_days
            )));
        }
        Ok(None)
    }
}
