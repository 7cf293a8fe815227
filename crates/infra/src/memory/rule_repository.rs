//! In-memory implementation of the RuleRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use slotwise_core::RuleRepository;
use slotwise_domain::{AvailabilityRule, Result};
use tracing::debug;

use super::store::MemoryStore;

/// In-memory rule repository over the shared store.
pub struct InMemoryRuleRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryRuleRepository {
    /// Create a new rule repository
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RuleRepository for InMemoryRuleRepository {
    async fn get_availability_rule(&self, member_id: &str) -> Result<Option<AvailabilityRule>> {
        let rule = self.store.rules.read().get(member_id).cloned();
        debug!(member_id, configured = rule.is_some(), "fetched availability rule");
        Ok(rule)
    }
}
