//! Integration tests for slot and date discovery.

mod support;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use slotwise_domain::{
    AssignmentAlgorithm, AvailabilityRule, DateOverride, DayHours, WorkingHoursConfig,
};
use support::repositories::{confirmed_booking, department_of, TestStore};
use support::{at, monday, slot_finder, time};

fn weekdays_nine_to_five() -> WorkingHoursConfig {
    let open = DayHours::open(time(9, 0), time(17, 0));
    WorkingHoursConfig {
        monday: open.clone(),
        tuesday: open.clone(),
        wednesday: open.clone(),
        thursday: open.clone(),
        friday: open,
        ..WorkingHoursConfig::default()
    }
}

#[tokio::test]
async fn test_member_slots_respect_hours_and_bookings() {
    let store = Arc::new(TestStore::default());
    store.seed_working_hours("alice", weekdays_nine_to_five());
    store.seed_booking(confirmed_booking("b-1", "alice", at(10, 0), at(11, 0)));
    let finder = slot_finder(&store);

    let slots = finder
        .member_available_slots("alice", monday(), 60, at(0, 0))
        .await
        .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();

    // 9:00 ends exactly when the booking starts (touching is fine)
    assert!(starts.contains(&at(9, 0)));
    // Anything overlapping the 10:00 booking is out
    assert!(!starts.contains(&at(9, 15)));
    assert!(!starts.contains(&at(10, 0)));
    assert!(!starts.contains(&at(10, 45)));
    // Free again from 11:00, up to the last start that still fits by 17:00
    assert!(starts.contains(&at(11, 0)));
    assert!(starts.contains(&at(16, 0)));
    assert!(!starts.contains(&at(16, 15)));
    // 9:00, then the 15-minute grid from 11:00 through 16:00
    assert_eq!(slots.len(), 22);
}

#[tokio::test]
async fn test_member_slots_apply_minimum_notice() {
    let store = Arc::new(TestStore::default());
    store.seed_working_hours("alice", weekdays_nine_to_five());
    store.seed_rule(
        "alice",
        AvailabilityRule {
            min_notice_hours: 2,
            max_advance_days: 30,
            ..AvailabilityRule::permissive()
        },
    );
    let finder = slot_finder(&store);

    // At noon, everything before 14:00 is short notice
    let slots = finder
        .member_available_slots("alice", monday(), 30, at(12, 0))
        .await
        .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert!(!starts.contains(&at(13, 45)));
    assert!(starts.contains(&at(14, 0)));
}

#[tokio::test]
async fn test_department_slots_carry_available_members() {
    let store = Arc::new(TestStore::default());
    store.seed_department(department_of(
        "sales",
        AssignmentAlgorithm::RoundRobin,
        &["alice", "bob"],
    ));
    // Alice mornings, Bob afternoons
    store.seed_working_hours(
        "alice",
        WorkingHoursConfig {
            monday: DayHours::open(time(9, 0), time(12, 0)),
            ..WorkingHoursConfig::default()
        },
    );
    store.seed_working_hours(
        "bob",
        WorkingHoursConfig {
            monday: DayHours::open(time(13, 0), time(17, 0)),
            ..WorkingHoursConfig::default()
        },
    );
    let finder = slot_finder(&store);

    let slots = finder
        .department_available_slots("sales", monday(), 60, at(0, 0))
        .await
        .unwrap();

    let morning = slots.iter().find(|s| s.start == at(9, 0)).unwrap();
    assert_eq!(morning.available_members, vec!["alice".to_string()]);

    let afternoon = slots.iter().find(|s| s.start == at(13, 0)).unwrap();
    assert_eq!(afternoon.available_members, vec!["bob".to_string()]);

    // Noon fits neither schedule
    assert!(!slots.iter().any(|s| s.start == at(12, 0)));
}

#[tokio::test]
async fn test_department_without_active_members_has_no_slots() {
    let store = Arc::new(TestStore::default());
    let mut department = department_of("sales", AssignmentAlgorithm::RoundRobin, &["alice"]);
    department.members[0].is_active = false;
    store.seed_department(department);
    let finder = slot_finder(&store);

    let slots = finder
        .department_available_slots("sales", monday(), 30, at(0, 0))
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_department_dates_skip_weekends_overrides_and_far_future() {
    let store = Arc::new(TestStore::default());
    store.seed_department(department_of("sales", AssignmentAlgorithm::RoundRobin, &["alice"]));
    store.seed_working_hours("alice", weekdays_nine_to_five());
    store.seed_rule(
        "alice",
        AvailabilityRule {
            min_notice_hours: 0,
            max_advance_days: 10,
            ..AvailabilityRule::permissive()
        },
    );
    store.seed_override("alice", DateOverride::blocked(at(0, 0).date() + Duration::days(2), "offsite"));
    let finder = slot_finder(&store);

    // Today is Monday 2025-06-02; the advance window closes at June 12
    let dates = finder.department_available_dates("sales", 2025, 6, monday()).await.unwrap();

    let day = |d: u32| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
    assert_eq!(
        dates,
        vec![day(2), day(3), day(5), day(6), day(9), day(10), day(11), day(12)]
    );
}

#[tokio::test]
async fn test_date_screen_fails_open_without_config() {
    let store = Arc::new(TestStore::default());
    let finder = slot_finder(&store);

    assert!(finder.has_availability_on_date("alice", monday()).await.unwrap());

    store.seed_override("alice", DateOverride::blocked(monday(), "vacation"));
    assert!(!finder.has_availability_on_date("alice", monday()).await.unwrap());
}
