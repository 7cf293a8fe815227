//! In-memory implementation of the BookingRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_core::BookingRepository;
use slotwise_domain::{Booking, Result, SlotwiseError};
use tracing::debug;

use super::store::MemoryStore;

/// In-memory booking repository over the shared store.
pub struct InMemoryBookingRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryBookingRepository {
    /// Create a new booking repository
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn get_bookings_in_range(
        &self,
        member_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .store
            .bookings
            .read()
            .values()
            .filter(|b| b.involves(member_id))
            .filter(|b| b.start < to && b.end > from)
            .cloned()
            .collect();
        // Deterministic order for the callers that render lists
        bookings.sort_by_key(|b| b.start);

        debug!(member_id, %from, %to, count = bookings.len(), "fetched bookings in range");
        Ok(bookings)
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>> {
        Ok(self.store.bookings.read().get(booking_id).cloned())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.store.bookings.write();
        if bookings.contains_key(&booking.id) {
            return Err(SlotwiseError::InvalidInput(format!(
                "Booking '{}' already exists",
                booking.id
            )));
        }
        debug!(booking_id = %booking.id, member_id = %booking.primary_member, "inserted booking");
        bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn update_assignees(
        &self,
        booking_id: &str,
        member_ids: Vec<String>,
        primary_member: String,
    ) -> Result<()> {
        let mut bookings = self.store.bookings.write();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("Booking '{booking_id}'")))?;
        booking.member_ids = member_ids;
        booking.primary_member = primary_member;
        debug!(booking_id, "updated booking assignees");
        Ok(())
    }
}
