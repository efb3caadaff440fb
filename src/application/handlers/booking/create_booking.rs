//! CreateBookingHandler - Command handler for new roadside bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, NewBooking};
use crate::ports::{BookingRepository, CreateTaskRequest, DispatchCrm, TaskPriority};

/// Command to book a tow or roadside service.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub booking: NewBooking,
}

/// Handler for creating bookings.
///
/// The CRM task is created first. Its failure only downgrades the booking to
/// local-only; the local insert decides success.
pub struct CreateBookingHandler {
    crm: Arc<dyn DispatchCrm>,
    bookings: Arc<dyn BookingRepository>,
}

impl CreateBookingHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { crm, bookings }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        let booking = cmd.booking;

        let (crm_task_id, crm_error) = match self.crm.create_task(task_request(&booking)).await {
            Ok(created) => (created.task_id, None),
            Err(e) => (None, Some(e)),
        };

        let created = self
            .bookings
            .create(booking.with_crm_task_id(crm_task_id))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, crm_error = ?crm_error, "Failed to store booking");
                BookingError::storage("Failed to create booking", e)
            })?;

        if let Some(e) = crm_error {
            tracing::warn!(
                booking_number = %created.booking_number,
                error = %e,
                "CRM task creation failed, booking stored locally only"
            );
        }

        tracing::info!(
            booking_number = %created.booking_number,
            crm_task_id = ?created.crm_task_id,
            "Booking created"
        );
        Ok(created)
    }
}

fn task_request(booking: &NewBooking) -> CreateTaskRequest {
    CreateTaskRequest {
        customer_name: booking.name.clone(),
        customer_phone: booking.phone.clone(),
        customer_email: None,
        vehicle_details: booking.vehicle.compose(),
        service_type: booking.service_type.clone(),
        priority: TaskPriority::Normal,
        pickup_location: booking.pickup_location.clone(),
        pickup_lat: None,
        pickup_lng: None,
        dropoff_location: non_empty(&booking.dropoff_location),
        dropoff_lat: None,
        dropoff_lng: None,
        notes: non_empty(&booking.notes),
        estimated_cost: None,
    }
}

/// Blank optional text is not sent to the CRM.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
