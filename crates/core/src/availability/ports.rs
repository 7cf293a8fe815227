//! Port interfaces for availability checking
//!
//! These traits define the boundary between the engine and the external data
//! store. They return snapshots; the engine never writes through them except
//! for the booking commit path.
//!
//! Graceful degradation is part of the contract: a member without a
//! working-hours config or availability rule yields `Ok(None)`, never an
//! error — absent configuration must not lock out a newly onboarded member.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use slotwise_domain::{
    AvailabilityRule, Booking, DateOverride, ExternalBusyInterval, Result, WorkingHoursConfig,
};

/// Trait for reading a member's configured schedule.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// The member's weekly working hours, if configured.
    async fn get_working_hours(&self, member_id: &str) -> Result<Option<WorkingHoursConfig>>;

    /// The single override for a (member, date) pair, if one exists.
    async fn get_date_override(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DateOverride>>;
}

/// Trait for reading a member's authoritative availability rule.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// The member's default rule, if configured.
    async fn get_availability_rule(&self, member_id: &str) -> Result<Option<AvailabilityRule>>;
}

/// Trait for reading and committing bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings (any status) assigned to the member whose window overlaps
    /// `[from, to)`. Callers filter by status.
    async fn get_bookings_in_range(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>>;

    /// Look up a booking by id.
    async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>>;

    /// Persist a new booking.
    async fn insert_booking(&self, booking: Booking) -> Result<()>;

    /// Replace the assigned member set of an existing booking.
    async fn update_assignees(
        &self,
        booking_id: &str,
        member_ids: Vec<String>,
        primary_member: String,
    ) -> Result<()>;
}

/// Trait for reading synced external-calendar busy intervals.
#[async_trait]
pub trait BusyIntervalRepository: Send + Sync {
    /// Busy intervals for the member whose window overlaps `[from, to)`,
    /// regardless of sync state. Callers filter with
    /// [`ExternalBusyInterval::blocks_slots`].
    async fn get_busy_intervals(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ExternalBusyInterval>>;
}
