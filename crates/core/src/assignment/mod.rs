//! Assignment of department bookings
//!
//! Selection (round-robin or least-busy over the orchestrator's verdicts) is
//! read-only; the counters that drive fairness move only inside the guarded
//! commit path, so two racing requests can never both win the same member.

pub mod guard;
pub mod ports;
pub mod service;
pub mod stats;

pub use service::AssignmentService;
