//! UpdateBookingStatusHandler - Command handler for status changes.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::booking::{merge_status_update, Booking, BookingError, BookingStatus};
use crate::ports::{BookingRepository, DispatchCrm, TaskEdit};

/// Command to move a booking to a new tracker status.
#[derive(Debug, Clone)]
pub struct UpdateBookingStatusCommand {
    /// CRM task id, job number, or local numeric id.
    pub id: String,
    pub status: BookingStatus,
}

/// Where the status change landed.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdateOutcome {
    /// The CRM accepted the edit. Local storage is untouched.
    Remote(Value),
    /// The CRM refused and the local row was updated instead.
    Local(Booking),
}

/// Handler for status updates.
pub struct UpdateBookingStatusHandler {
    crm: Arc<dyn DispatchCrm>,
    bookings: Arc<dyn BookingRepository>,
}

impl UpdateBookingStatusHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { crm, bookings }
    }

    pub async fn handle(
        &self,
        cmd: UpdateBookingStatusCommand,
    ) -> Result<StatusUpdateOutcome, BookingError> {
        if !cmd.status.is_tracked() {
            return Err(BookingError::validation(format!(
                "Invalid status: {}",
                cmd.status
            )));
        }

        let edit = TaskEdit::status(cmd.status.crm_code());
        match self.crm.edit_task(&cmd.id, edit).await {
            Ok(task) => {
                return Ok(StatusUpdateOutcome::Remote(merge_status_update(
                    &task, &cmd.id, cmd.status,
                )));
            }
            Err(e) => {
                tracing::warn!(id = %cmd.id, error = %e, "CRM status edit failed");
            }
        }

        let Ok(local_id) = cmd.id.parse::<i32>() else {
            return Err(BookingError::not_found("Booking not found"));
        };

        let updated = self
            .bookings
            .update_status(local_id, cmd.status)
            .await
            .map_err(|e| {
                tracing::error!(id = local_id, error = %e, "Failed to update local booking status");
                BookingError::storage("Failed to update booking status", e)
            })?;

        updated
            .map(StatusUpdateOutcome::Local)
            .ok_or_else(|| BookingError::not_found("Booking not found"))
    }
}
