//! Shared in-memory store backing the port adapters
//!
//! One `MemoryStore` is shared (via `Arc`) across all adapters, mirroring how
//! a connection pool would be shared by database-backed repositories. The
//! seeding methods apply the same configuration-time validation a real
//! storage layer would: invalid rules, overrides and departments are rejected
//! when written, so the engine never sees them.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use slotwise_domain::{
    AvailabilityRule, Booking, BookingStatus, DateOverride, Department, ExternalBusyInterval,
    Result, SlotwiseError, WorkingHoursConfig,
};

/// In-memory snapshot store.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) working_hours: RwLock<HashMap<String, WorkingHoursConfig>>,
    pub(crate) rules: RwLock<HashMap<String, AvailabilityRule>>,
    /// Keyed by (member, date): the hard one-override-per-date invariant.
    pub(crate) overrides: RwLock<HashMap<(String, NaiveDate), DateOverride>>,
    pub(crate) bookings: RwLock<HashMap<String, Booking>>,
    pub(crate) busy_intervals: RwLock<Vec<ExternalBusyInterval>>,
    pub(crate) departments: RwLock<HashMap<String, Department>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a member's weekly schedule.
    pub fn set_working_hours(&self, member_id: impl Into<String>, config: WorkingHoursConfig) {
        self.working_hours.write().insert(member_id.into(), config);
    }

    /// Set a member's availability rule; the rule is validated first.
    pub fn set_availability_rule(
        &self,
        member_id: impl Into<String>,
        rule: AvailabilityRule,
    ) -> Result<()> {
        rule.validate()?;
        self.rules.write().insert(member_id.into(), rule);
        Ok(())
    }

    /// Upsert the single override for a (member, date) pair; validated first.
    pub fn set_date_override(
        &self,
        member_id: impl Into<String>,
        date_override: DateOverride,
    ) -> Result<()> {
        date_override.validate()?;
        self.overrides.write().insert((member_id.into(), date_override.date), date_override);
        Ok(())
    }

    /// Add a synced (or pending/failed) busy interval.
    pub fn add_busy_interval(&self, interval: ExternalBusyInterval) {
        self.busy_intervals.write().push(interval);
    }

    /// Insert or replace a department; validated first.
    pub fn insert_department(&self, department: Department) -> Result<()> {
        department.validate()?;
        self.departments.write().insert(department.id.clone(), department);
        Ok(())
    }

    /// Change a booking's status (cancellations, completions).
    pub fn set_booking_status(&self, booking_id: &str, status: BookingStatus) -> Result<()> {
        let mut bookings = self.bookings.write();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("Booking '{booking_id}'")))?;
        booking.status = status;
        Ok(())
    }

    /// Number of stored bookings, regardless of status.
    pub fn booking_count(&self) -> usize {
        self.bookings.read().len()
    }
}
