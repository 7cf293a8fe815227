//! Seedable in-memory implementations of all core ports
//!
//! Unlike the production adapters, these mocks skip configuration-time
//! validation so tests can construct edge states (a department with nobody
//! active, say) that a real store would refuse to persist.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use slotwise_core::{
    BookingRepository, BusyIntervalRepository, DepartmentRepository, RuleRepository,
    ScheduleRepository,
};
use slotwise_domain::{
    AvailabilityRule, Booking, BookingStatus, DateOverride, Department, DepartmentMember,
    ExternalBusyInterval, Result, SlotwiseError, SyncState, WorkingHoursConfig,
};

/// One store implementing every port, shared across a test via `Arc`.
#[derive(Default)]
pub struct TestStore {
    working_hours: RwLock<HashMap<String, WorkingHoursConfig>>,
    rules: RwLock<HashMap<String, AvailabilityRule>>,
    overrides: RwLock<HashMap<(String, NaiveDate), DateOverride>>,
    bookings: RwLock<HashMap<String, Booking>>,
    busy_intervals: RwLock<Vec<ExternalBusyInterval>>,
    departments: RwLock<HashMap<String, Department>>,
}

impl TestStore {
    pub fn seed_working_hours(&self, member_id: &str, config: WorkingHoursConfig) {
        self.working_hours.write().unwrap().insert(member_id.to_string(), config);
    }

    pub fn seed_rule(&self, member_id: &str, rule: AvailabilityRule) {
        self.rules.write().unwrap().insert(member_id.to_string(), rule);
    }

    pub fn seed_override(&self, member_id: &str, date_override: DateOverride) {
        self.overrides
            .write()
            .unwrap()
            .insert((member_id.to_string(), date_override.date), date_override);
    }

    pub fn seed_booking(&self, booking: Booking) {
        self.bookings.write().unwrap().insert(booking.id.clone(), booking);
    }

    pub fn seed_busy_interval(&self, interval: ExternalBusyInterval) {
        self.busy_intervals.write().unwrap().push(interval);
    }

    pub fn seed_department(&self, department: Department) {
        self.departments.write().unwrap().insert(department.id.clone(), department);
    }

    pub fn set_booking_status(&self, booking_id: &str, status: BookingStatus) {
        if let Some(booking) = self.bookings.write().unwrap().get_mut(booking_id) {
            booking.status = status;
        }
    }

    pub fn booking(&self, booking_id: &str) -> Option<Booking> {
        self.bookings.read().unwrap().get(booking_id).cloned()
    }

    pub fn department(&self, department_id: &str) -> Option<Department> {
        self.departments.read().unwrap().get(department_id).cloned()
    }

    pub fn member_counters(&self, department_id: &str, member_id: &str) -> (Option<NaiveDateTime>, u32) {
        let departments = self.departments.read().unwrap();
        let member = departments
            .get(department_id)
            .and_then(|d| d.members.iter().find(|m| m.member_id == member_id))
            .cloned()
            .unwrap();
        (member.last_assigned_at, member.total_assignments)
    }
}

/// A department of active members with fresh counters, in listing order.
pub fn department_of(id: &str, algorithm: slotwise_domain::AssignmentAlgorithm, members: &[&str]) -> Department {
    Department {
        id: id.to_string(),
        name: id.to_string(),
        assignment_algorithm: algorithm,
        members: members.iter().map(|m| DepartmentMember::active(*m)).collect(),
    }
}

/// A confirmed single-member booking.
pub fn confirmed_booking(id: &str, member: &str, start: NaiveDateTime, end: NaiveDateTime) -> Booking {
    Booking {
        id: id.to_string(),
        department_id: "sales".to_string(),
        member_ids: vec![member.to_string()],
        primary_member: member.to_string(),
        start,
        end,
        status: BookingStatus::Confirmed,
    }
}

/// A synced, blocking, timed busy interval.
pub fn synced_busy_interval(id: &str, member: &str, start: NaiveDateTime, end: NaiveDateTime) -> ExternalBusyInterval {
    ExternalBusyInterval {
        id: id.to_string(),
        member_id: member.to_string(),
        title: Some("External event".to_string()),
        start,
        end,
        blocking: true,
        is_all_day: false,
        sync_state: SyncState::Synced,
    }
}

#[async_trait]
impl ScheduleRepository for TestStore {
    async fn get_working_hours(&self, member_id: &str) -> Result<Option<WorkingHoursConfig>> {
        Ok(self.working_hours.read().unwrap().get(member_id).cloned())
    }

    async fn get_date_override(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DateOverride>> {
        Ok(self.overrides.read().unwrap().get(&(member_id.to_string(), date)).cloned())
    }
}

#[async_trait]
impl RuleRepository for TestStore {
    async fn get_availability_rule(&self, member_id: &str) -> Result<Option<AvailabilityRule>> {
        Ok(self.rules.read().unwrap().get(member_id).cloned())
    }
}

#[async_trait]
impl BookingRepository for TestStore {
    async fn get_bookings_in_range(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .unwrap()
            .values()
            .filter(|b| b.involves(member_id))
            .filter(|b| b.start < to && b.end > from)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start);
        Ok(bookings)
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>> {
        Ok(self.bookings.read().unwrap().get(booking_id).cloned())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<()> {
        self.bookings.write().unwrap().insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn update_assignees(
        &self,
        booking_id: &str,
        member_ids: Vec<String>,
        primary_member: String,
    ) -> Result<()> {
        let mut bookings = self.bookings.write().unwrap();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("Booking '{booking_id}'")))?;
        booking.member_ids = member_ids;
        booking.primary_member = primary_member;
        Ok(())
    }
}

#[async_trait]
impl BusyIntervalRepository for TestStore {
    async fn get_busy_intervals(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ExternalBusyInterval>> {
        Ok(self
            .busy_intervals
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.member_id == member_id)
            .filter(|i| i.start < to && i.end > from)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DepartmentRepository for TestStore {
    async fn get_department(&self, department_id: &str) -> Result<Department> {
        self.departments
            .read()
            .unwrap()
            .get(department_id)
            .cloned()
            .ok_or_else(|| SlotwiseError::NotFound(format!("Department '{department_id}'")))
    }

    async fn get_active_members(&self, department_id: &str) -> Result<Vec<DepartmentMember>> {
        Ok(self.get_department(department_id).await?.active_members())
    }

    async fn record_assignment(
        &self,
        department_id: &str,
        member_id: &str,
        assigned_at: NaiveDateTime,
    ) -> Result<()> {
        let mut departments = self.departments.write().unwrap();
        let member = departments
            .get_mut(department_id)
            .and_then(|d| d.members.iter_mut().find(|m| m.member_id == member_id))
            .ok_or_else(|| {
                SlotwiseError::NotFound(format!(
                    "Member '{member_id}' in department '{department_id}'"
                ))
            })?;
        member.last_assigned_at = Some(assigned_at);
        member.total_assignments += 1;
        Ok(())
    }
}
