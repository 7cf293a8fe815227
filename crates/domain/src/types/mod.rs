//! Domain types and models

pub mod assignment;
pub mod booking;
pub mod calendar;
pub mod conflict;
pub mod department;
pub mod rules;
pub mod schedule;

// Re-export the working set for convenience
pub use assignment::{
    AssignedMember, DepartmentStatistics, MemberStatistics, RebalanceReport, RebalanceStatus,
};
pub use booking::{Booking, BookingDraft, BookingStatus};
pub use calendar::{ExternalBusyInterval, SyncState};
pub use conflict::{AvailabilityResult, BufferSide, Conflict, ConflictKind};
pub use department::{AssignmentAlgorithm, Department, DepartmentMember};
pub use rules::{AvailabilityRule, DateOverride};
pub use schedule::{DayHours, WorkingHoursConfig};
