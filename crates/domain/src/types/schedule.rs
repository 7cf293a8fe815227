//! Weekly working-hours schedule
//!
//! The schedule arrives from member settings as a JSON blob keyed by weekday
//! name. It is modeled as an exhaustive per-weekday struct instead of a free
//! map so the engine can never be surprised by a missing or misspelled key.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Working hours for a single weekday.
///
/// A day absent from the source JSON deserializes with `enabled: false` —
/// a configured schedule only opens the days it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayHours {
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Default for DayHours {
    fn default() -> Self {
        Self { enabled: false, start: day_start(), end: day_end() }
    }
}

impl DayHours {
    /// An enabled day spanning the given window.
    pub fn open(start: NaiveTime, end: NaiveTime) -> Self {
        Self { enabled: true, start, end }
    }
}

/// Per-member weekly schedule.
///
/// An *absent* config means the member is treated as available 24/7 — the
/// fail-open default, so a newly onboarded member is never locked out by
/// missing configuration. A *present* config closes every day it does not
/// explicitly enable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingHoursConfig {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WorkingHoursConfig {
    /// Parse the settings blob; any malformed payload degrades to `None`
    /// (fail-open) instead of propagating a configuration error.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Look up the entry for a weekday.
    pub fn day(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}

/// `"HH:MM"` (de)serialization for `NaiveTime`, matching the settings blob.
/// Seconds are accepted on input for tolerance.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
