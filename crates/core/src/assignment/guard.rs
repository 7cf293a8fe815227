//! Per-member serialization of the booking commit path
//!
//! Two simultaneous booking requests can both pass an availability check;
//! whichever reaches the commit second must observe the first one's booking.
//! The guard serializes "re-validate → write booking → update counters" per
//! member so that can never be violated. Checks themselves never lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-member commit locks.
///
/// Locks are created lazily on first use and kept for the registry's
/// lifetime; member cardinality is small enough that eviction is not worth
/// the bookkeeping.
#[derive(Default)]
pub struct MemberLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl MemberLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the commit lock for a member, waiting if another commit for
    /// the same member is in flight.
    pub async fn acquire(&self, member_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(member_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Acquire locks for several members in a deadlock-free order.
    ///
    /// Ids are locked in sorted order so two commits over overlapping member
    /// sets always acquire in the same sequence.
    pub async fn acquire_all(&self, member_ids: &[String]) -> Vec<OwnedMutexGuard<()>> {
        let mut ids: Vec<&String> = member_ids.iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            guards.push(self.acquire(id).await);
        }
        guards
    }
}
