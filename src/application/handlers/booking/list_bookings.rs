//! ListBookingsHandler - Query handler for the booking list.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingRecord, BookingView};
use crate::ports::{BookingRepository, DispatchCrm};

/// Query for all bookings.
#[derive(Debug, Clone, Default)]
pub struct ListBookingsQuery;

/// Lists bookings from the CRM, or from local storage when the CRM is down.
///
/// A successful CRM answer replaces the local list entirely; the two are
/// never merged.
pub struct ListBookingsHandler {
    crm: Arc<dyn DispatchCrm>,
    bookings: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { crm, bookings }
    }

    pub async fn handle(&self, _query: ListBookingsQuery) -> Result<Vec<BookingRecord>, BookingError> {
        match self.crm.get_all_tasks(self.crm.task_page()).await {
            Ok(tasks) => {
                return Ok(tasks
                    .iter()
                    .map(|task| BookingView::from_crm_job(task).into())
                    .collect());
            }
            Err(e) => {
                tracing::warn!(error = %e, "CRM task list unavailable, using local bookings");
            }
        }

        let local = self.bookings.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list local bookings");
            BookingError::storage("Failed to fetch bookings", e)
        })?;
        Ok(local.into_iter().map(BookingRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::MockDispatchCrm;
    use crate::adapters::memory::InMemoryBookingRepository;
    use crate::domain::booking::{BookingStatus, NewBooking, VehicleDescription};
    use serde_json::json;

    async fn repo_with_one_booking() -> InMemoryBookingRepository {
        let repo = InMemoryBookingRepository::new();
        repo.create(NewBooking {
            name: "Kimo Kealoha".to_string(),
            phone: "8085550123".to_string(),
            vehicle: VehicleDescription::new("Toyota", "Tacoma", "White"),
            pickup_location: "Ala Moana Center".to_string(),
            dropoff_location: None,
            service_type: "towing".to_string(),
            notes: None,
            status: BookingStatus::Received,
            crm_task_id: None,
        })
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn crm_tasks_replace_local_rows() {
        let crm = MockDispatchCrm::new();
        crm.add_task(json!({
            "task_id": "task-abc-12345",
            "job_number": "JOB-1001",
            "customer_name": "Leilani Kahale",
            "vehicle_details": "2022 Toyota Camry (Silver)",
            "status_code": 2
        }));
        crm.add_task(json!({
            "task": { "task_id": "task-def-67890", "status_code": "4" },
            "agent": { "name": "Keoni", "phone": "8085550100" }
        }));
        let handler = ListBookingsHandler::new(
            Arc::new(crm),
            Arc::new(repo_with_one_booking().await),
        );

        let records = handler.handle(ListBookingsQuery).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(BookingRecord::is_remote));
        let value = serde_json::to_value(&records).unwrap();
        let camry = value
            .as_array()
            .unwrap()
            .iter()
            .find(|v| v["id"] == "task-abc-12345")
            .unwrap();
        assert_eq!(camry["status"], "en_route");
        assert_eq!(camry["vehicleModel"], "Toyota Camry");
    }

    #[tokio::test]
    async fn empty_crm_list_is_still_authoritative() {
        let handler = ListBookingsHandler::new(
            Arc::new(MockDispatchCrm::new()),
            Arc::new(repo_with_one_booking().await),
        );

        assert!(handler.handle(ListBookingsQuery).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_local_rows_when_crm_is_down() {
        let handler = ListBookingsHandler::new(
            Arc::new(MockDispatchCrm::unreachable()),
            Arc::new(repo_with_one_booking().await),
        );

        let records = handler.handle(ListBookingsQuery).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_remote());
    }

    #[tokio::test]
    async fn both_sources_failing_is_a_storage_error() {
        let handler = ListBookingsHandler::new(
            Arc::new(MockDispatchCrm::unreachable()),
            Arc::new(InMemoryBookingRepository::failing()),
        );

        let err = handler.handle(ListBookingsQuery).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch bookings");
    }
}
