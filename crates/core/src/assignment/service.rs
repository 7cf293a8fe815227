//! Assignment service - selection strategies and the guarded commit path

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_domain::{
    AssignedMember, AssignmentAlgorithm, Booking, BookingDraft, BookingStatus, DepartmentMember,
    Result, SlotwiseError,
};
use tracing::{debug, warn};

use crate::availability::ports::BookingRepository;
use crate::availability::AvailabilityService;

use super::guard::MemberLocks;
use super::ports::DepartmentRepository;

/// Assignment service for department bookings.
///
/// Selection walks the ordered candidates and returns the first one the
/// orchestrator reports free; it never mutates state. The fairness counters
/// move only inside [`AssignmentService::commit_assignment`], under the
/// per-member guard, so concurrent booking attempts cannot double-book a
/// member or skew the rotation.
pub struct AssignmentService {
    availability: Arc<AvailabilityService>,
    bookings: Arc<dyn BookingRepository>,
    departments: Arc<dyn DepartmentRepository>,
    locks: MemberLocks,
}

impl AssignmentService {
    /// Create a new assignment service
    pub fn new(
        availability: Arc<AvailabilityService>,
        bookings: Arc<dyn BookingRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self { availability, bookings, departments, locks: MemberLocks::new() }
    }

    /// Pick a member for the slot without committing anything.
    ///
    /// `algorithm` overrides the department's configured strategy when given.
    pub async fn assign(
        &self,
        department_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: u32,
        algorithm: Option<AssignmentAlgorithm>,
    ) -> Result<AssignedMember> {
        let department = self.departments.get_department(department_id).await?;
        let algorithm = algorithm.unwrap_or(department.assignment_algorithm);

        let candidates = ordered_candidates(department.active_members(), algorithm);
        if candidates.is_empty() {
            return Err(SlotwiseError::NoEligibleMembers(format!(
                "No active members in department '{}'",
                department.name
            )));
        }

        for candidate in &candidates {
            let verdict = self
                .availability
                .check_availability(&candidate.member_id, date, start_time, duration_minutes, None)
                .await?;
            if verdict.available {
                debug!(member_id = %candidate.member_id, %algorithm, "candidate selected");
                return Ok(assigned(&candidate.member_id, algorithm));
            }
        }

        Err(SlotwiseError::NoAvailableMember(format!(
            "No members available in department '{}' at the requested time",
            department.name
        )))
    }

    /// Commit a booking for its assigned members.
    ///
    /// Runs the race-safe sequence: acquire the members' commit locks,
    /// re-validate each assignee against the slot, write the booking, then
    /// record the assignment for the primary member.
    /// A re-check failure surfaces as
    /// [`SlotwiseError::ConcurrentConflict`] — the caller decides whether to
    /// try another member.
    pub async fn commit_assignment(
        &self,
        department_id: &str,
        draft: BookingDraft,
        now: NaiveDateTime,
    ) -> Result<Booking> {
        draft.validate()?;

        let duration_minutes =
            u32::try_from((draft.end - draft.start).num_minutes()).unwrap_or(0);

        let _guards = self.locks.acquire_all(&draft.member_ids).await;

        // Re-validate while holding the locks: a racing commit may have taken
        // the slot after the caller's optimistic check.
        for member_id in &draft.member_ids {
            let verdict = self
                .availability
                .check_availability(
                    member_id,
                    draft.start.date(),
                    draft.start.time(),
                    duration_minutes,
                    None,
                )
                .await?;
            if !verdict.available {
                let reason = verdict.reason().unwrap_or("slot no longer available");
                warn!(member_id = %member_id, reason, "commit lost the race");
                return Err(SlotwiseError::ConcurrentConflict(format!(
                    "Member '{member_id}' is no longer available: {reason}"
                )));
            }
        }

        let primary = draft.primary_member.clone();
        let booking = Booking::from_draft(draft);
        self.bookings.insert_booking(booking.clone()).await?;
        self.departments.record_assignment(department_id, &primary, now).await?;

        debug!(booking_id = %booking.id, member_id = %primary, "booking committed");
        Ok(booking)
    }

    /// Full booking flow: walk the ordered candidates, first successful
    /// guarded commit wins.
    ///
    /// A candidate that loses its race is skipped, not fatal; the next one is
    /// tried. Exhausting the candidates yields
    /// [`SlotwiseError::NoAvailableMember`].
    pub async fn book(
        &self,
        department_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: u32,
        status: BookingStatus,
        algorithm: Option<AssignmentAlgorithm>,
        now: NaiveDateTime,
    ) -> Result<(Booking, AssignedMember)> {
        let department = self.departments.get_department(department_id).await?;
        let algorithm = algorithm.unwrap_or(department.assignment_algorithm);

        let candidates = ordered_candidates(department.active_members(), algorithm);
        if candidates.is_empty() {
            return Err(SlotwiseError::NoEligibleMembers(format!(
                "No active members in department '{}'",
                department.name
            )));
        }

        let start = date.and_time(start_time);
        let end = start + chrono::Duration::minutes(i64::from(duration_minutes));

        for candidate in &candidates {
            let verdict = self
                .availability
                .check_availability(&candidate.member_id, date, start_time, duration_minutes, None)
                .await?;
            if !verdict.available {
                continue;
            }

            let draft =
                BookingDraft::for_member(department_id, &candidate.member_id, start, end, status);
            match self.commit_assignment(department_id, draft, now).await {
                Ok(booking) => {
                    return Ok((booking, assigned(&candidate.member_id, algorithm)));
                }
                Err(SlotwiseError::ConcurrentConflict(reason)) => {
                    warn!(member_id = %candidate.member_id, %reason, "candidate lost its race; trying next");
                }
                Err(err) => return Err(err),
            }
        }

        Err(SlotwiseError::NoAvailableMember(format!(
            "No members available in department '{}' at the requested time",
            department.name
        )))
    }

    /// Move a booking to a different member.
    ///
    /// The booking itself is excluded from the new member's availability
    /// check so an in-place move does not conflict with itself.
    pub async fn reassign(
        &self,
        booking_id: &str,
        new_member_id: &str,
        now: NaiveDateTime,
    ) -> Result<Booking> {
        let booking = self
            .bookings
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| SlotwiseError::NotFound(format!("Booking '{booking_id}'")))?;

        let duration_minutes =
            u32::try_from((booking.end - booking.start).num_minutes()).unwrap_or(0);

        let verdict = self
            .availability
            .check_availability(
                new_member_id,
                booking.start.date(),
                booking.start.time(),
                duration_minutes,
                Some(booking_id),
            )
            .await?;
        if !verdict.available {
            let reason = verdict.reason().unwrap_or("member is not available");
            return Err(SlotwiseError::NoAvailableMember(format!(
                "Cannot reassign to '{new_member_id}': {reason}"
            )));
        }

        let _guard = self.locks.acquire(new_member_id).await;

        // Re-validate under the lock, as for a fresh commit
        let verdict = self
            .availability
            .check_availability(
                new_member_id,
                booking.start.date(),
                booking.start.time(),
                duration_minutes,
                Some(booking_id),
            )
            .await?;
        if !verdict.available {
            let reason = verdict.reason().unwrap_or("slot no longer available");
            return Err(SlotwiseError::ConcurrentConflict(format!(
                "Member '{new_member_id}' is no longer available: {reason}"
            )));
        }

        self.bookings
            .update_assignees(booking_id, vec![new_member_id.to_string()], new_member_id.to_string())
            .await?;
        self.departments.record_assignment(&booking.department_id, new_member_id, now).await?;

        debug!(booking_id, new_member_id, "booking reassigned");

        Ok(Booking {
            member_ids: vec![new_member_id.to_string()],
            primary_member: new_member_id.to_string(),
            ..booking
        })
    }

    pub(crate) fn departments(&self) -> &Arc<dyn DepartmentRepository> {
        &self.departments
    }

    pub(crate) fn bookings(&self) -> &Arc<dyn BookingRepository> {
        &self.bookings
    }
}

fn assigned(member_id: &str, algorithm: AssignmentAlgorithm) -> AssignedMember {
    AssignedMember {
        member_id: member_id.to_string(),
        algorithm,
        reason: format!("Assigned using {algorithm} algorithm"),
    }
}

/// Order the candidates per the strategy.
///
/// Round-robin sorts by `last_assigned_at` ascending with never-assigned
/// members first (treated as oldest); least-busy sorts by
/// `total_assignments` ascending. Both sorts are stable, so listing order
/// breaks ties deterministically.
fn ordered_candidates(
    mut members: Vec<DepartmentMember>,
    algorithm: AssignmentAlgorithm,
) -> Vec<DepartmentMember> {
    match algorithm {
        AssignmentAlgorithm::RoundRobin => {
            members.sort_by_key(|m| m.last_assigned_at.unwrap_or(NaiveDateTime::MIN));
        }
        AssignmentAlgorithm::LeastBusy => {
            members.sort_by_key(|m| m.total_assignments);
        }
    }
    members
}
