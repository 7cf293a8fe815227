//! # Slotwise Infra
//!
//! Adapter implementations of the `slotwise-core` ports.
//!
//! Persistence proper is out of scope for the engine; the in-memory store in
//! this crate is the reference adapter standing in for the external data
//! store, and the fixture the integration suites build on. Each repository
//! file implements exactly one core port over the shared [`MemoryStore`].

pub mod memory;

pub use memory::store::MemoryStore;
pub use memory::{
    InMemoryBookingRepository, InMemoryBusyIntervalRepository, InMemoryDepartmentRepository,
    InMemoryRuleRepository, InMemoryScheduleRepository,
};
