//! Engine configuration
//!
//! Knobs for slot-grid generation. The booking window and grid step were
//! hard-coded in earlier iterations of the product; they are injected here so
//! deployments can tune them without touching the engine.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SLOT_INTERVAL_MINUTES;

/// Configuration for slot generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid step (minutes) when listing a single member's open slots.
    pub slot_interval_minutes: u32,
    /// Start of the window offered to public department bookings.
    pub public_window_start: NaiveTime,
    /// End of the window offered to public department bookings.
    pub public_window_end: NaiveTime,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            // Typical business hours; individual working hours are still
            // validated per slot.
            public_window_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            public_window_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        }
    }
}
