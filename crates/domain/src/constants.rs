//! Domain constants
//!
//! Centralized location for the configuration-time bounds enforced when
//! availability rules and date overrides are saved.

// Availability rule bounds
pub const MAX_BUFFER_MINUTES: u32 = 240; // 4 hours
pub const MAX_BOOKINGS_PER_DAY_LIMIT: u32 = 50;
pub const MAX_BOOKINGS_PER_WEEK_LIMIT: u32 = 200;
pub const MAX_MIN_NOTICE_HOURS: u32 = 720; // 30 days
pub const MAX_ADVANCE_DAYS_LIMIT: u32 = 365;

// Date override bounds
pub const MAX_OVERRIDE_SPAN_MINUTES: i64 = 1440; // 24 hours

// Slot generation defaults
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 15;
