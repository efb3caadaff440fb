//! Booking repository port.
//!
//! Local persistence for bookings. The local table is a fallback copy; the
//! CRM is authoritative whenever it answers.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::foundation::DomainError;

/// Repository port for local booking rows.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking under a freshly generated `BK-####` number.
    ///
    /// # Errors
    ///
    /// - `DuplicateBookingNumber` if the generated number is taken (no retry)
    /// - `DatabaseError` on persistence failure
    async fn create(&self, booking: NewBooking) -> Result<Booking, DomainError>;

    /// All bookings, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, DomainError>;

    /// Find a booking by its local id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, DomainError>;

    /// Newest booking whose phone has exactly the same digits.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Booking>, DomainError>;

    /// Set the status and bump `updated_at`.
    ///
    /// Returns `None` if no booking has this id.
    async fn update_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> Result<Option<Booking>, DomainError>;
}
