//! Assignment statistics and workload rebalancing analysis
//!
//! Read-only reporting used to sanity-check that the assignment algorithm is
//! spreading load the way it should. Nothing here mutates counters.

use chrono::{Duration, NaiveDate, NaiveTime};
use slotwise_domain::{
    BookingStatus, DepartmentStatistics, MemberStatistics, RebalanceReport, RebalanceStatus, Result,
};

use super::service::AssignmentService;

/// Deviation from the average (as a fraction of it) beyond which a member
/// counts as over- or underloaded.
const IMBALANCE_THRESHOLD: f64 = 0.3;

impl AssignmentService {
    /// Per-member assignment statistics over a lookback window, busiest
    /// members first.
    pub async fn assignment_statistics(
        &self,
        department_id: &str,
        lookback_days: u32,
        today: NaiveDate,
    ) -> Result<DepartmentStatistics> {
        let department = self.departments().get_department(department_id).await?;

        let window_start =
            (today - Duration::days(i64::from(lookback_days))).and_time(NaiveTime::MIN);
        let window_end = (today + Duration::days(1)).and_time(NaiveTime::MIN);

        let mut statistics = Vec::with_capacity(department.members.len());
        for member in &department.members {
            let recent_bookings = self
                .bookings()
                .get_bookings_in_range(&member.member_id, window_start, window_end)
                .await?
                .iter()
                .filter(|b| counts_for_statistics(b.status))
                .count();

            statistics.push(MemberStatistics {
                member_id: member.member_id.clone(),
                is_active: member.is_active,
                total_assignments: member.total_assignments,
                recent_bookings: u32::try_from(recent_bookings).unwrap_or(u32::MAX),
                last_assigned_at: member.last_assigned_at,
            });
        }

        statistics.sort_by(|a, b| b.recent_bookings.cmp(&a.recent_bookings));

        Ok(DepartmentStatistics {
            department_id: department.id,
            period_days: lookback_days,
            statistics,
        })
    }

    /// Analyze whether recent load is spread evenly across the active
    /// members and suggest follow-ups when it is not.
    pub async fn rebalance_analysis(
        &self,
        department_id: &str,
        lookback_days: u32,
        today: NaiveDate,
    ) -> Result<RebalanceReport> {
        let stats = self.assignment_statistics(department_id, lookback_days, today).await?;
        let active: Vec<&MemberStatistics> =
            stats.statistics.iter().filter(|s| s.is_active).collect();

        if active.is_empty() {
            return Ok(RebalanceReport {
                status: RebalanceStatus::NoActiveMembers,
                average_assignments: 0.0,
                active_member_count: 0,
                overloaded_members: Vec::new(),
                underloaded_members: Vec::new(),
                suggestions: vec!["No active members in department".to_string()],
            });
        }

        let total: u32 = active.iter().map(|s| s.recent_bookings).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = f64::from(total) / active.len() as f64;
        let threshold = average * IMBALANCE_THRESHOLD;

        let overloaded: Vec<&&MemberStatistics> = active
            .iter()
            .filter(|s| f64::from(s.recent_bookings) > average + threshold)
            .collect();
        let underloaded: Vec<&&MemberStatistics> = active
            .iter()
            .filter(|s| f64::from(s.recent_bookings) < average - threshold)
            .collect();

        let mut suggestions = Vec::new();
        if overloaded.is_empty() && underloaded.is_empty() {
            suggestions.push("Assignments are well-balanced across all members".to_string());
        } else {
            for member in &overloaded {
                let diff = f64::from(member.recent_bookings) - average;
                suggestions.push(format!(
                    "{} has {diff:.0} more assignments than average; check their availability rules and calendar sync",
                    member.member_id
                ));
            }
            for member in &underloaded {
                let diff = average - f64::from(member.recent_bookings);
                suggestions.push(format!(
                    "{} has {diff:.0} fewer assignments than average; this may indicate limited availability or a recent join",
                    member.member_id
                ));
            }
            suggestions.push(
                "Ensure all members have similar working hours and availability rules for best balance"
                    .to_string(),
            );
        }

        let status = if overloaded.is_empty() && underloaded.is_empty() {
            RebalanceStatus::Balanced
        } else {
            RebalanceStatus::Imbalanced
        };

        Ok(RebalanceReport {
            status,
            average_assignments: average,
            active_member_count: active.len(),
            overloaded_members: overloaded.iter().map(|s| s.member_id.clone()).collect(),
            underloaded_members: underloaded.iter().map(|s| s.member_id.clone()).collect(),
            suggestions,
        })
    }
}

/// Statuses that count toward the lookback statistics. Unlike conflict
/// detection, completed meetings still represent carried load here.
fn counts_for_statistics(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::Completed)
}
