//! Error types used throughout the engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Slotwise
///
/// "Unavailable" is never represented here: availability checks return an
/// [`crate::AvailabilityResult`] carrying the aggregated conflicts instead of
/// failing. These variants cover configuration rejection, lookup failures and
/// the assignment outcomes callers must branch on.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotwiseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Active members exist but none is free for the requested slot.
    #[error("No available member: {0}")]
    NoAvailableMember(String),

    /// The department has no active members at all; distinguished from
    /// [`SlotwiseError::NoAvailableMember`] so callers can render a different
    /// state for "nobody free" vs "nobody eligible".
    #[error("No eligible members: {0}")]
    NoEligibleMembers(String),

    /// Lost the race at commit time; the caller decides whether to retry
    /// against a different member.
    #[error("Concurrent conflict: {0}")]
    ConcurrentConflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slotwise operations
pub type Result<T> = std::result::Result<T, SlotwiseError>;
