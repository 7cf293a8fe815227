//! In-memory implementation of the DepartmentRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_core::DepartmentRepository;
use slotwise_domain::{Department, DepartmentMember, Result, SlotwiseError};
use tracing::debug;

use super::store::MemoryStore;

/// In-memory department repository over the shared store.
pub struct InMemoryDepartmentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryDepartmentRepository {
    /// Create a new department repository
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn get_department(&self, department_id: &str) -> Result<Department> {
        self.store
            .departments
            .read()
            .get(department_id)
            .cloned()
            .ok_or_else(|| SlotwiseError::NotFound(format!("Department '{department_id}'")))
    }

    async fn get_active_members(&self, department_id: &str) -> Result<Vec<DepartmentMember>> {
        let department = self.get_department(department_id).await?;
        Ok(department.active_members())
    }

    async fn record_assignment(
        &self,
        department_id: &str,
        member_id: &str,
        assigned_at: NaiveDateTime,
    ) -> Result<()> {
        let mut departments = self.store.departments.write();
        let department = departments
            .get_mut(department_id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("Department '{department_id}'")))?;
        let member = department
            .members
            .iter_mut()
            .find(|m| m.member_id == member_id)
            .ok_or_else(|| {
                SlotwiseError::NotFound(format!(
                    "Member '{member_id}' in department '{department_id}'"
                ))
            })?;

        member.last_assigned_at = Some(assigned_at);
        member.total_assignments += 1;

        debug!(department_id, member_id, total = member.total_assignments, "recorded assignment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use slotwise_domain::AssignmentAlgorithm;

    use super::*;

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_department(Department {
                id: "sales".into(),
                name: "Sales".into(),
                assignment_algorithm: AssignmentAlgorithm::RoundRobin,
                members: vec![
                    DepartmentMember::active("alice"),
                    DepartmentMember { is_active: false, ..DepartmentMember::active("bob") },
                ],
            })
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_active_members_filters_inactive() {
        let repo = InMemoryDepartmentRepository::new(seeded_store());

        let members = repo.get_active_members("sales").await.unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].member_id, "alice");
    }

    #[tokio::test]
    async fn test_record_assignment_moves_counters() {
        let repo = InMemoryDepartmentRepository::new(seeded_store());
        let now = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();

        repo.record_assignment("sales", "alice", now).await.unwrap();

        let department = repo.get_department("sales").await.unwrap();
        let alice = department.members.iter().find(|m| m.member_id == "alice").unwrap();
        assert_eq!(alice.total_assignments, 1);
        assert_eq!(alice.last_assigned_at, Some(now));
    }

    #[tokio::test]
    async fn test_unknown_targets_are_not_found() {
        let repo = InMemoryDepartmentRepository::new(seeded_store());
        let now = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();

        assert!(matches!(
            repo.get_department("missing").await,
            Err(SlotwiseError::NotFound(_))
        ));
        assert!(matches!(
            repo.record_assignment("sales", "carol", now).await,
            Err(SlotwiseError::NotFound(_))
        ));
    }
}
