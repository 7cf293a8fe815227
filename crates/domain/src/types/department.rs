//! Departments and their memberships

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotwiseError};

/// Load-balancing strategy used when a booking targets the department rather
/// than a specific member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentAlgorithm {
    /// Longest-idle-first rotation on `last_assigned_at`.
    #[default]
    RoundRobin,
    /// Lowest cumulative `total_assignments` wins.
    LeastBusy,
}

impl fmt::Display for AssignmentAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin => write!(f, "Round Robin"),
            Self::LeastBusy => write!(f, "Least Busy"),
        }
    }
}

/// A member's row inside a department.
///
/// The two counters are the assignment-fairness state; they are mutated only
/// by the commit path, under the per-member guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMember {
    pub member_id: String,
    pub is_active: bool,
    pub last_assigned_at: Option<NaiveDateTime>,
    pub total_assignments: u32,
}

impl DepartmentMember {
    /// A fresh, active membership that has never been assigned.
    pub fn active(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            is_active: true,
            last_assigned_at: None,
            total_assignments: 0,
        }
    }
}

/// A bookable department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub assignment_algorithm: AssignmentAlgorithm,
    pub members: Vec<DepartmentMember>,
}

impl Department {
    /// Configuration-time validation: a department must carry at least one
    /// member, no duplicates, and at least one active member.
    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(SlotwiseError::InvalidInput(format!(
                "Department '{}' must have at least one member",
                self.id
            )));
        }
        let mut ids: Vec<&str> = self.members.iter().map(|m| m.member_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.members.len() {
            return Err(SlotwiseError::InvalidInput(format!(
                "Department '{}' has duplicate members",
                self.id
            )));
        }
        if !self.members.iter().any(|m| m.is_active) {
            return Err(SlotwiseError::InvalidInput(format!(
                "Department '{}' must have at least one active member",
                self.id
            )));
        }
        Ok(())
    }

    /// The members eligible for assignment, in listing order.
    pub fn active_members(&self) -> Vec<DepartmentMember> {
        self.members.iter().filter(|m| m.is_active).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department(members: Vec<DepartmentMember>) -> Department {
        Department {
            id: "sales".into(),
            name: "Sales".into(),
            assignment_algorithm: AssignmentAlgorithm::RoundRobin,
            members,
        }
    }

    #[test]
    fn test_valid_department() {
        let dept = department(vec![
            DepartmentMember::active("alice"),
            DepartmentMember { is_active: false, ..DepartmentMember::active("bob") },
        ]);

        assert!(dept.validate().is_ok());
        let active = dept.active_members();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].member_id, "alice");
    }

    #[test]
    fn test_rejects_empty_duplicate_and_all_inactive() {
        assert!(department(vec![]).validate().is_err());

        let dupes =
            department(vec![DepartmentMember::active("alice"), DepartmentMember::active("alice")]);
        assert!(dupes.validate().is_err());

        let inactive = department(vec![DepartmentMember {
            is_active: false,
            ..DepartmentMember::active("alice")
        }]);
        assert!(inactive.validate().is_err());
    }
}
