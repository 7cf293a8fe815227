//! Shared test helpers for `slotwise-core` integration tests.
//!
//! These helpers provide a seedable in-memory store implementing every port,
//! so the availability and assignment suites can focus on behaviour instead
//! of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_core::{AssignmentService, AvailabilityService, SlotFinder};
use slotwise_domain::EngineConfig;

use self::repositories::TestStore;

/// A Monday, so weekday-keyed fixtures are predictable.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    monday().and_hms_opt(hour, minute, 0).unwrap()
}

/// Availability service wired to the shared test store.
pub fn availability_service(store: &Arc<TestStore>) -> Arc<AvailabilityService> {
    Arc::new(AvailabilityService::new(
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        Arc::clone(store) as _,
    ))
}

/// Assignment service wired to the shared test store.
pub fn assignment_service(store: &Arc<TestStore>) -> AssignmentService {
    AssignmentService::new(
        availability_service(store),
        Arc::clone(store) as _,
        Arc::clone(store) as _,
    )
}

/// Slot finder wired to the shared test store with default config.
pub fn slot_finder(store: &Arc<TestStore>) -> SlotFinder {
    SlotFinder::new(
        availability_service(store),
        Arc::clone(store) as _,
        Arc::clone(store) as _,
        EngineConfig::default(),
    )
}
