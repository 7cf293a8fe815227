//! Availability rules and date overrides
//!
//! Rules are validated when configured, not when booked: a malformed rule is
//! rejected up front so booking-time evaluation can trust whatever the
//! provider hands back.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_ADVANCE_DAYS_LIMIT, MAX_BOOKINGS_PER_DAY_LIMIT, MAX_BOOKINGS_PER_WEEK_LIMIT,
    MAX_BUFFER_MINUTES, MAX_MIN_NOTICE_HOURS,
};
use crate::errors::{Result, SlotwiseError};

/// Per-member scheduling constraints.
///
/// Zero means "unlimited" for the quota fields and "none" for the buffers.
/// At most one rule per member is marked default; the default rule is the
/// authoritative one consulted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub buffer_before_minutes: u32,
    pub buffer_after_minutes: u32,
    pub max_per_day: u32,
    pub max_per_week: u32,
    pub min_notice_hours: u32,
    pub max_advance_days: u32,
    pub is_default: bool,
}

impl AvailabilityRule {
    /// The fallback applied when a member has no configured rule: no buffers,
    /// no quotas, no notice or advance limits. Never persisted and never
    /// passed through [`AvailabilityRule::validate`].
    pub fn permissive() -> Self {
        Self {
            buffer_before_minutes: 0,
            buffer_after_minutes: 0,
            max_per_day: 0,
            max_per_week: 0,
            min_notice_hours: 0,
            max_advance_days: 0,
            is_default: false,
        }
    }

    /// Configuration-time validation. A rule that fails here is rejected at
    /// save time; booking-time evaluation never sees it.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_before_minutes > MAX_BUFFER_MINUTES {
            return Err(SlotwiseError::InvalidInput(format!(
                "Buffer before cannot exceed {MAX_BUFFER_MINUTES} minutes"
            )));
        }
        if self.buffer_after_minutes > MAX_BUFFER_MINUTES {
            return Err(SlotwiseError::InvalidInput(format!(
                "Buffer after cannot exceed {MAX_BUFFER_MINUTES} minutes"
            )));
        }
        if self.max_per_day > MAX_BOOKINGS_PER_DAY_LIMIT {
            return Err(SlotwiseError::InvalidInput(format!(
                "Max bookings per day cannot exceed {MAX_BOOKINGS_PER_DAY_LIMIT}; use 0 for unlimited"
            )));
        }
        if self.max_per_week > MAX_BOOKINGS_PER_WEEK_LIMIT {
            return Err(SlotwiseError::InvalidInput(format!(
                "Max bookings per week cannot exceed {MAX_BOOKINGS_PER_WEEK_LIMIT}; use 0 for unlimited"
            )));
        }
        if self.max_per_day > 0 && self.max_per_week > 0 && self.max_per_day > self.max_per_week {
            return Err(SlotwiseError::InvalidInput(format!(
                "Max bookings per day ({}) cannot exceed max bookings per week ({})",
                self.max_per_day, self.max_per_week
            )));
        }
        if self.min_notice_hours > MAX_MIN_NOTICE_HOURS {
            return Err(SlotwiseError::InvalidInput(format!(
                "Minimum notice cannot exceed {MAX_MIN_NOTICE_HOURS} hours"
            )));
        }
        if self.max_advance_days == 0 || self.max_advance_days > MAX_ADVANCE_DAYS_LIMIT {
            return Err(SlotwiseError::InvalidInput(format!(
                "Maximum days in advance must be between 1 and {MAX_ADVANCE_DAYS_LIMIT}"
            )));
        }
        // Comparable units: notice expressed in days must stay below the
        // advance window or no bookable date exists at all.
        let min_notice_days = f64::from(self.min_notice_hours) / 24.0;
        if min_notice_days >= f64::from(self.max_advance_days) {
            return Err(SlotwiseError::InvalidInput(format!(
                "Minimum notice ({} hours = {:.1} days) must be less than maximum days in advance ({} days)",
                self.min_notice_hours, min_notice_days, self.max_advance_days
            )));
        }
        Ok(())
    }
}

/// A per-date exception to the weekly schedule.
///
/// At most one override exists per (member, date) — the store enforces the
/// uniqueness. When `available` is false the custom hours are meaningless and
/// are ignored; when true with custom hours, those hours fully replace the
/// weekday schedule for that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub available: bool,
    pub custom_start: Option<NaiveTime>,
    pub custom_end: Option<NaiveTime>,
    pub reason: Option<String>,
}

impl DateOverride {
    /// Blocks the whole date.
    pub fn blocked(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            date,
            available: false,
            custom_start: None,
            custom_end: None,
            reason: Some(reason.into()),
        }
    }

    /// Opens the date with a custom window replacing the weekday schedule.
    pub fn custom_hours(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, available: true, custom_start: Some(start), custom_end: Some(end), reason: None }
    }

    /// Configuration-time validation.
    pub fn validate(&self) -> Result<()> {
        if self.available {
            let (Some(start), Some(end)) = (self.custom_start, self.custom_end) else {
                return Err(SlotwiseError::InvalidInput(
                    "Custom start and end hours are required when the override is available".into(),
                ));
            };
            if end <= start {
                return Err(SlotwiseError::InvalidInput(
                    "Custom end hours must be after custom start hours".into(),
                ));
            }
        }
        Ok(())
    }

    /// The replacement window, when this override both opens the date and
    /// carries custom hours.
    pub fn custom_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        if !self.available {
            return None;
        }
        match (self.custom_start, self.custom_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}
