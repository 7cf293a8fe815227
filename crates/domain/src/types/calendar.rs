//! Busy intervals synced from external calendars
//!
//! The sync mechanics (OAuth, pull/push, retries) live outside the engine;
//! only the resulting busy-interval records are consumed here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sync lifecycle of an external event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    Pending,
    Synced,
    Failed,
}

/// A busy interval sourced from an external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalBusyInterval {
    /// Id of the sync record, referenced by conflict reports.
    pub id: String,
    pub member_id: String,
    pub title: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub blocking: bool,
    pub is_all_day: bool,
    pub sync_state: SyncState,
}

impl ExternalBusyInterval {
    /// Whether this interval participates in time-slot conflict math.
    ///
    /// All-day events are handled as whole-day unavailability elsewhere, and
    /// only records in the confirmed `Synced` state count — an event stuck in
    /// a failed sync must not silently free up the slot it covers.
    pub fn blocks_slots(&self) -> bool {
        self.blocking && !self.is_all_day && self.sync_state == SyncState::Synced
    }

    /// Display title with the source system's fallback.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Busy")
    }
}
