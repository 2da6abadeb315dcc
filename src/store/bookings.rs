use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::{KvStore, BOOKINGS_KEY};
use crate::models::Booking;
use crate::utils::error::AppError;

/// Typed view over the `bookings` collection. Records are held as one
/// serialized JSON list under a single key, rewritten on every change.
#[derive(Clone)]
pub struct BookingStore {
    store: Arc<dyn KvStore>,
}

impl BookingStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn read_all(&self) -> Result<Vec<Booking>, AppError> {
        match self.store.get(BOOKINGS_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self, bookings: &[Booking]) -> Result<(), AppError> {
        let text = serde_json::to_string(bookings)?;
        self.store.set(BOOKINGS_KEY, &text)?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Booking>, AppError> {
        self.read_all()
    }

    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let mut bookings = self.read_all()?;
        bookings.retain(|booking| booking.user_id == user_id);
        Ok(bookings)
    }

    pub fn append(&self, booking: &Booking) -> Result<(), AppError> {
        let mut bookings = self.read_all()?;
        bookings.push(booking.clone());
        self.write_all(&bookings)?;
        info!(booking_id = %booking.id, hotel_id = %booking.hotel_id, "booking appended");
        Ok(())
    }

    /// Replaces the record with the same id. Returns whether a record
    /// was found.
    pub fn update(&self, booking: &Booking) -> Result<bool, AppError> {
        let mut bookings = self.read_all()?;
        let Some(slot) = bookings.iter_mut().find(|candidate| candidate.id == booking.id) else {
            return Ok(false);
        };
        *slot = booking.clone();
        self.write_all(&bookings)?;
        Ok(true)
    }

    /// Removes the record with the given id. Returns whether a record
    /// was found.
    pub fn remove(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut bookings = self.read_all()?;
        let before = bookings.len();
        bookings.retain(|booking| booking.id != *id);
        if bookings.len() == before {
            return Ok(false);
        }
        self.write_all(&bookings)?;
        Ok(true)
    }
}
