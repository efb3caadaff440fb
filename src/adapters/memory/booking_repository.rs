//! In-memory booking storage.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::phone::same_number;
use crate::domain::booking::{generate_booking_number, Booking, BookingStatus, NewBooking};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::BookingRepository;

/// In-memory implementation of the BookingRepository port.
///
/// Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    rows: Arc<RwLock<Vec<Booking>>>,
    failing: Arc<AtomicBool>,
    status_updates: Arc<AtomicUsize>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails with a database error.
    pub fn failing() -> Self {
        let repo = Self::new();
        repo.set_failing(true);
        repo
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `update_status` calls that reached storage.
    pub fn status_update_count(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::database("Database unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking, DomainError> {
        self.check_available()?;

        let booking_number = generate_booking_number();
        let mut rows = self.rows.write().await;
        if rows.iter().any(|b| b.booking_number == booking_number) {
            return Err(DomainError::new(
                ErrorCode::DuplicateBookingNumber,
                "Booking number already exists",
            )
            .with_detail("booking_number", booking_number));
        }

        let id = rows.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let created = Booking::from_new(id, booking_number, booking, Timestamp::now());
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
        self.check_available()?;
        // Insertion order is creation order; ids break timestamp ties.
        Ok(self.rows.read().await.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, DomainError> {
        self.check_available()?;
        Ok(self.rows.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Booking>, DomainError> {
        self.check_available()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .find(|b| same_number(&b.phone, phone))
            .cloned())
    }

    async fn update_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> Result<Option<Booking>, DomainError> {
        self.status_updates.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|b| b.id == id).map(|booking| {
            booking.set_status(status, Timestamp::now());
            booking.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::VehicleDescription;

    fn booking(phone: &str) -> NewBooking {
        NewBooking {
            name: "Kimo Kealoha".to_string(),
            phone: phone.to_string(),
            vehicle: VehicleDescription::new("Toyota", "Tacoma", "White"),
            pickup_location: "Ala Moana Center".to_string(),
            dropoff_location: None,
            service_type: "towing".to_string(),
            notes: None,
            status: BookingStatus::Received,
            crm_task_id: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_booking_numbers() {
        let repo = InMemoryBookingRepository::new();
        let first = repo.create(booking("8085550123")).await.unwrap();
        let second = repo.create(booking("8085550124")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.booking_number.starts_with("BK-"));
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let repo = InMemoryBookingRepository::new();
        repo.create(booking("8085550123")).await.unwrap();
        repo.create(booking("8085550124")).await.unwrap();

        let ids: Vec<i32> = repo.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn find_by_phone_ignores_formatting_and_prefers_newest() {
        let repo = InMemoryBookingRepository::new();
        repo.create(booking("808-555-0123")).await.unwrap();
        repo.create(booking("(808) 555-0123")).await.unwrap();

        let found = repo.find_by_phone("8085550123").await.unwrap().unwrap();
        assert_eq!(found.id, 2);
        assert!(repo.find_by_phone("5550123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_of_missing_row_is_none() {
        let repo = InMemoryBookingRepository::new();
        let updated = repo.update_status(99, BookingStatus::Completed).await.unwrap();

        assert!(updated.is_none());
        assert_eq!(repo.status_update_count(), 1);
    }

    #[tokio::test]
    async fn update_status_bumps_updated_at() {
        let repo = InMemoryBookingRepository::new();
        let created = repo.create(booking("8085550123")).await.unwrap();

        let updated = repo
            .update_status(created.id, BookingStatus::EnRoute)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, BookingStatus::EnRoute);
        assert!(!created.updated_at.is_after(&updated.updated_at));
    }

    #[tokio::test]
    async fn failing_repository_reports_database_errors() {
        let repo = InMemoryBookingRepository::failing();
        let err = repo.create(booking("8085550123")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
