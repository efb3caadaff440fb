//! FindBookingByPhoneHandler - Query handler for the customer tracker lookup.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingRecord, BookingView};
use crate::ports::{BookingRepository, DispatchCrm};

/// Query for the booking belonging to a phone number.
#[derive(Debug, Clone)]
pub struct FindBookingByPhoneQuery {
    pub phone: String,
}

/// Looks a booking up in the CRM by phone, then in local storage.
///
/// The CRM match is loose (suffix), the local match is exact on digits.
pub struct FindBookingByPhoneHandler {
    crm: Arc<dyn DispatchCrm>,
    bookings: Arc<dyn BookingRepository>,
}

impl FindBookingByPhoneHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { crm, bookings }
    }

    pub async fn handle(&self, query: FindBookingByPhoneQuery) -> Result<BookingRecord, BookingError> {
        match self.crm.get_job_details_by_phone(&query.phone).await {
            Ok(job) => return Ok(BookingView::from_crm_job(&job).into()),
            Err(e) => {
                tracing::debug!(error = %e, "No CRM booking for phone, checking local storage");
            }
        }

        let booking = self.bookings.find_by_phone(&query.phone).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to look up booking by phone");
            BookingError::storage("Failed to fetch booking", e)
        })?;

        booking
            .map(BookingRecord::from)
            .ok_or_else(|| BookingError::not_found("No active booking found for this number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::MockDispatchCrm;
    use crate::adapters::memory::InMemoryBookingRepository;
    use crate::domain::booking::{BookingStatus, NewBooking, VehicleDescription};
    use serde_json::json;

    fn booking(phone: &str) -> NewBooking {
        NewBooking {
            name: "Kimo Kealoha".to_string(),
            phone: phone.to_string(),
            vehicle: VehicleDescription::new("Toyota", "Tacoma", "White"),
            pickup_location: "Ala Moana Center".to_string(),
            dropoff_location: None,
            service_type: "lockout".to_string(),
            notes: None,
            status: BookingStatus::Received,
            crm_task_id: None,
        }
    }

    fn query(phone: &str) -> FindBookingByPhoneQuery {
        FindBookingByPhoneQuery {
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn crm_match_wins_and_carries_agent() {
        let crm = MockDispatchCrm::new();
        crm.add_agent(json!({
            "agent_id": "AG-7",
            "name": "Keoni",
            "phone": "8085550100",
            "current_lat": "21.2911",
            "current_lng": "-157.8434"
        }));
        crm.add_task(json!({
            "task_id": "task-abc-12345",
            "customer_phone": "18085550123",
            "agent_id": "AG-7",
            "status_code": 1
        }));
        let handler =
            FindBookingByPhoneHandler::new(Arc::new(crm), Arc::new(InMemoryBookingRepository::new()));

        let record = handler.handle(query("5550123")).await.unwrap();

        let BookingRecord::Remote(view) = record else {
            panic!("expected a CRM booking");
        };
        assert_eq!(view.status, BookingStatus::Assigning);
        assert_eq!(view.agent_name.as_deref(), Some("Keoni"));
        assert_eq!(view.agent_location.unwrap().lat, json!("21.2911"));
    }

    #[tokio::test]
    async fn falls_back_to_exact_local_match() {
        let repo = InMemoryBookingRepository::new();
        repo.create(booking("(808) 555-0123")).await.unwrap();
        let handler =
            FindBookingByPhoneHandler::new(Arc::new(MockDispatchCrm::unreachable()), Arc::new(repo));

        let record = handler.handle(query("808-555-0123")).await.unwrap();
        assert!(!record.is_remote());
    }

    #[tokio::test]
    async fn unknown_number_is_not_found() {
        let repo = InMemoryBookingRepository::new();
        repo.create(booking("8085550123")).await.unwrap();
        let handler = FindBookingByPhoneHandler::new(Arc::new(MockDispatchCrm::new()), Arc::new(repo));

        // Suffix matching is CRM-only.
        let err = handler.handle(query("5550123")).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
        assert_eq!(err.to_string(), "No active booking found for this number");
    }
}
