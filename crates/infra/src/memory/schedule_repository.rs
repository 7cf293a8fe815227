//! In-memory implementation of the ScheduleRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use slotwise_core::ScheduleRepository;
use slotwise_domain::{DateOverride, Result, WorkingHoursConfig};
use tracing::debug;

use super::store::MemoryStore;

/// In-memory schedule repository over the shared store.
pub struct InMemoryScheduleRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryScheduleRepository {
    /// Create a new schedule repository
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn get_working_hours(&self, member_id: &str) -> Result<Option<WorkingHoursConfig>> {
        let config = self.store.working_hours.read().get(member_id).cloned();
        debug!(member_id, configured = config.is_some(), "fetched working hours");
        Ok(config)
    }

    async fn get_date_override(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DateOverride>> {
        let date_override =
            self.store.overrides.read().get(&(member_id.to_string(), date)).cloned();
        debug!(member_id, %date, found = date_override.is_some(), "fetched date override");
        Ok(date_override)
    }
}
