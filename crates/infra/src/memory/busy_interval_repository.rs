//! In-memory implementation of the BusyIntervalRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_core::BusyIntervalRepository;
use slotwise_domain::{ExternalBusyInterval, Result};
use tracing::debug;

use super::store::MemoryStore;

/// In-memory busy-interval repository over the shared store.
pub struct InMemoryBusyIntervalRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryBusyIntervalRepository {
    /// Create a new busy-interval repository
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BusyIntervalRepository for InMemoryBusyIntervalRepository {
    async fn get_busy_intervals(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ExternalBusyInterval>> {
        let intervals: Vec<ExternalBusyInterval> = self
            .store
            .busy_intervals
            .read()
            .iter()
            .filter(|i| i.member_id == member_id)
            .filter(|i| i.start < to && i.end > from)
            .cloned()
            .collect();

        debug!(member_id, %from, %to, count = intervals.len(), "fetched busy intervals");
        Ok(intervals)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use slotwise_domain::SyncState;

    use super::*;

    #[tokio::test]
    async fn test_returns_all_sync_states_in_window() {
        let store = Arc::new(MemoryStore::new());
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        for (id, sync_state) in
            [("evt-1", SyncState::Synced), ("evt-2", SyncState::Failed)]
        {
            store.add_busy_interval(ExternalBusyInterval {
                id: id.into(),
                member_id: "alice".into(),
                title: None,
                start: date.and_hms_opt(9, 0, 0).unwrap(),
                end: date.and_hms_opt(10, 0, 0).unwrap(),
                blocking: true,
                is_all_day: false,
                sync_state,
            });
        }
        let repo = InMemoryBusyIntervalRepository::new(store);

        let intervals = repo
            .get_busy_intervals(
                "alice",
                date.and_hms_opt(0, 0, 0).unwrap(),
                date.and_hms_opt(23, 59, 0).unwrap(),
            )
            .await
            .unwrap();

        // Sync-state filtering is the detector's job, not the adapter's
        assert_eq!(intervals.len(), 2);
    }
}
