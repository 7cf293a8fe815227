//! Assignment outcomes and reporting types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::department::AssignmentAlgorithm;

/// A successful selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedMember {
    pub member_id: String,
    pub algorithm: AssignmentAlgorithm,
    pub reason: String,
}

/// Per-member slice of a department's assignment statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatistics {
    pub member_id: String,
    pub is_active: bool,
    pub total_assignments: u32,
    /// Busy bookings inside the report's lookback window.
    pub recent_bookings: u32,
    pub last_assigned_at: Option<NaiveDateTime>,
}

/// Assignment statistics for a department over a lookback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStatistics {
    pub department_id: String,
    pub period_days: u32,
    /// Sorted by recent load, busiest first.
    pub statistics: Vec<MemberStatistics>,
}

/// Verdict of a rebalance analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceStatus {
    Balanced,
    Imbalanced,
    NoActiveMembers,
}

/// Read-only workload analysis used to sanity-check the assignment algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceReport {
    pub status: RebalanceStatus,
    pub average_assignments: f64,
    pub active_member_count: usize,
    pub overloaded_members: Vec<String>,
    pub underloaded_members: Vec<String>,
    pub suggestions: Vec<String>,
}
