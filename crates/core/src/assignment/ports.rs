//! Port interfaces for assignment

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_domain::{Department, DepartmentMember, Result};

/// Trait for reading departments and recording assignments.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Look up a department with its full member list.
    async fn get_department(&self, department_id: &str) -> Result<Department>;

    /// The department's active members only, with their fairness counters, in
    /// listing order.
    async fn get_active_members(&self, department_id: &str) -> Result<Vec<DepartmentMember>>;

    /// Record a successful assignment: set the member's `last_assigned_at`
    /// and increment `total_assignments`.
    ///
    /// Only the guarded commit path calls this; the counters are never
    /// read-modify-written anywhere else.
    async fn record_assignment(
        &self,
        department_id: &str,
        member_id: &str,
        assigned_at: NaiveDateTime,
    ) -> Result<()>;
}
