//! Bookings and booking drafts

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SlotwiseError};

/// Lifecycle status of a booking.
///
/// Only `Pending` and `Confirmed` bookings occupy a member's calendar; every
/// other status is transparent to conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
    Rescheduled,
}

impl BookingStatus {
    /// Whether the booking counts as busy for conflict purposes.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// A committed booking.
///
/// One or more members are assigned, exactly one of them primary. Start and
/// end are department-local datetimes; normalization happens before the
/// engine is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub department_id: String,
    pub member_ids: Vec<String>,
    pub primary_member: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

impl Booking {
    /// Materialize a validated draft with a fresh id.
    pub fn from_draft(draft: BookingDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            department_id: draft.department_id,
            member_ids: draft.member_ids,
            primary_member: draft.primary_member,
            start: draft.start,
            end: draft.end,
            status: draft.status,
        }
    }

    /// Whether the member is assigned to this booking.
    pub fn involves(&self, member_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == member_id)
    }
}

/// The payload handed to the commit path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub department_id: String,
    pub member_ids: Vec<String>,
    pub primary_member: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

impl BookingDraft {
    /// A single-member draft, the common case for assigned bookings.
    pub fn for_member(
        department_id: impl Into<String>,
        member_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: BookingStatus,
    ) -> Self {
        let member_id = member_id.into();
        Self {
            department_id: department_id.into(),
            member_ids: vec![member_id.clone()],
            primary_member: member_id,
            start,
            end,
            status,
        }
    }

    /// Validate the draft before it reaches the commit path.
    pub fn validate(&self) -> Result<()> {
        if self.member_ids.is_empty() {
            return Err(SlotwiseError::InvalidInput(
                "At least one member must be assigned to the booking".into(),
            ));
        }
        let mut seen = self.member_ids.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.member_ids.len() {
            return Err(SlotwiseError::InvalidInput(
                "Duplicate members in the assigned member list".into(),
            ));
        }
        if !self.member_ids.iter().any(|id| *id == self.primary_member) {
            return Err(SlotwiseError::InvalidInput(
                "The primary member must be one of the assigned members".into(),
            ));
        }
        if self.end <= self.start {
            return Err(SlotwiseError::InvalidInput("End must be after start".into()));
        }
        if !self.status.is_busy() {
            return Err(SlotwiseError::InvalidInput(
                "New bookings must be created as Pending or Confirmed".into(),
            ));
        }
        Ok(())
    }
}
