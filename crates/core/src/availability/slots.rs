//! Slot finding for members and departments
//!
//! Built on top of the orchestrator: a slot is offered when the availability
//! check passes and the member's minimum-notice requirement is met. For
//! departments, a slot is offered when at least one active member qualifies.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_domain::{EngineConfig, Result, SlotwiseError};
use tracing::debug;

use crate::assignment::ports::DepartmentRepository;

use super::ports::ScheduleRepository;
use super::AvailabilityService;

/// An open slot for a single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// An open slot for a department, with the members free to take it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub available_members: Vec<String>,
}

/// Slot and date discovery over the availability orchestrator.
pub struct SlotFinder {
    availability: Arc<AvailabilityService>,
    schedules: Arc<dyn ScheduleRepository>,
    departments: Arc<dyn DepartmentRepository>,
    config: EngineConfig,
}

impl SlotFinder {
    /// Create a new slot finder
    pub fn new(
        availability: Arc<AvailabilityService>,
        schedules: Arc<dyn ScheduleRepository>,
        departments: Arc<dyn DepartmentRepository>,
        config: EngineConfig,
    ) -> Self {
        Self { availability, schedules, departments, config }
    }

    /// All open slots for a member on a date, on the configured grid.
    pub async fn member_available_slots(
        &self,
        member_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<TimeSlot>> {
        let step = i64::from(self.config.slot_interval_minutes.max(1));
        let day_start = date.and_time(NaiveTime::MIN);

        let mut slots = Vec::new();
        let mut offset = 0;
        while offset < 1440 {
            let start = day_start + Duration::minutes(offset);
            offset += step;

            let verdict = self
                .availability
                .check_availability(member_id, date, start.time(), duration_minutes, None)
                .await?;
            if !verdict.available {
                continue;
            }
            if self.availability.validate_minimum_notice(member_id, start, now).await?.is_some() {
                continue;
            }

            slots.push(TimeSlot {
                start,
                end: start + Duration::minutes(i64::from(duration_minutes)),
            });
        }

        debug!(member_id, %date, slot_count = slots.len(), "member slots computed");
        Ok(slots)
    }

    /// Open slots for a department on a date, stepping the public window by
    /// the meeting duration. A slot is offered when at least one active
    /// member is free for it.
    pub async fn department_available_slots(
        &self,
        department_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<DepartmentSlot>> {
        if duration_minutes == 0 {
            return Err(SlotwiseError::InvalidInput("Duration must be positive".into()));
        }

        let department = self.departments.get_department(department_id).await?;
        let members = department.active_members();
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let window_start = date.and_time(self.config.public_window_start);
        let window_end = date.and_time(self.config.public_window_end);

        let mut slots = Vec::new();
        let mut current = window_start;
        while current <= window_end {
            let mut available_members = Vec::new();
            for member in &members {
                let verdict = self
                    .availability
                    .check_availability(
                        &member.member_id,
                        date,
                        current.time(),
                        duration_minutes,
                        None,
                    )
                    .await?;
                if !verdict.available {
                    continue;
                }
                if self
                    .availability
                    .validate_minimum_notice(&member.member_id, current, now)
                    .await?
                    .is_some()
                {
                    continue;
                }
                available_members.push(member.member_id.clone());
            }

            if !available_members.is_empty() {
                slots.push(DepartmentSlot {
                    start: current,
                    end: current + Duration::minutes(i64::from(duration_minutes)),
                    available_members,
                });
            }

            current += Duration::minutes(i64::from(duration_minutes));
        }

        debug!(department_id, %date, slot_count = slots.len(), "department slots computed");
        Ok(slots)
    }

    /// The dates in a month on which the department has any chance of an open
    /// slot: past dates are skipped, and a date counts when at least one
    /// active member passes the advance-window check and the quick per-date
    /// screen.
    pub async fn department_available_dates(
        &self,
        department_id: &str,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| SlotwiseError::InvalidInput(format!("Invalid month {year}-{month}")))?;
        let next_month_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| SlotwiseError::InvalidInput(format!("Invalid month {year}-{month}")))?;

        let department = self.departments.get_department(department_id).await?;
        let members = department.active_members();
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        let mut current = first;
        while current < next_month_first {
            let date = current;
            current += Duration::days(1);

            if date < today {
                continue;
            }

            for member in &members {
                if self
                    .availability
                    .validate_advance_window(&member.member_id, date, today)
                    .await?
                    .is_some()
                {
                    continue;
                }
                if self.has_availability_on_date(&member.member_id, date).await? {
                    dates.push(date);
                    break;
                }
            }
        }

        Ok(dates)
    }

    /// Cheap screen for "could this member have any slot on this date":
    /// fail-open on missing config, weekday enabled, and no blocking
    /// override. Individual slots are still validated in full.
    pub async fn has_availability_on_date(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> Result<bool> {
        if let Some(config) = self.schedules.get_working_hours(member_id).await? {
            if !config.day(date.weekday()).enabled {
                return Ok(false);
            }
        }

        if let Some(date_override) = self.schedules.get_date_override(member_id, date).await? {
            if !date_override.available {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
