//! Conflict reporting for availability checks

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six independent conflict sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    WorkingHours,
    DateOverride,
    BookingConflict,
    CalendarEvent,
    BufferTime,
    QuotaExceeded,
}

/// Which buffer a neighboring booking violated.
///
/// Named from the neighbor's perspective: a booking finishing just before the
/// proposed slot violates the free time required *after* it; a booking
/// starting just after violates the free time required *before* it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferSide {
    Before,
    After,
}

impl fmt::Display for BufferSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A single violated constraint for a candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    /// Id of the booking or calendar event behind the conflict, when one
    /// specific record is responsible.
    pub related_id: Option<String>,
}

impl Conflict {
    pub fn new(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), related_id: None }
    }

    pub fn with_related(kind: ConflictKind, message: impl Into<String>, related_id: impl Into<String>) -> Self {
        Self { kind, message: message.into(), related_id: Some(related_id.into()) }
    }
}

/// The availability verdict for one candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    pub conflicts: Vec<Conflict>,
}

impl AvailabilityResult {
    /// Aggregate a detector run; available exactly when nothing conflicted.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self { available: conflicts.is_empty(), conflicts }
    }

    /// The first conflict message, for single-line error surfaces.
    pub fn reason(&self) -> Option<&str> {
        self.conflicts.first().map(|c| c.message.as_str())
    }
}
