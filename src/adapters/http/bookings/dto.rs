//! HTTP DTOs for booking endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::booking::{BookingError, BookingStatus, NewBooking, VehicleDescription};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/bookings`.
///
/// Missing strings default to empty so they fail validation with a readable
/// message instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Valid phone number is required"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Vehicle make is required"))]
    pub vehicle_make: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Vehicle model is required"))]
    pub vehicle_model: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Vehicle color is required"))]
    pub vehicle_color: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Pickup location is required"))]
    pub pickup_location: String,

    #[serde(default)]
    pub dropoff_location: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,

    #[serde(default)]
    pub notes: Option<String>,

    /// Initial tracker status; `received` when absent.
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateBookingRequest {
    pub fn into_new_booking(self) -> Result<NewBooking, BookingError> {
        let status = match self.status.as_deref() {
            None => BookingStatus::Received,
            Some(raw) => parse_tracked_status(raw)?,
        };

        Ok(NewBooking {
            name: self.name,
            phone: self.phone,
            vehicle: VehicleDescription::new(self.vehicle_make, self.vehicle_model, self.vehicle_color),
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            service_type: self.service_type,
            notes: self.notes,
            status,
            crm_task_id: None,
        })
    }
}

/// Body of `PATCH /api/bookings/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

impl UpdateStatusRequest {
    pub fn status(&self) -> Result<BookingStatus, BookingError> {
        parse_tracked_status(&self.status)
    }
}

/// Body of `POST /api/bookings/:id/assign`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAgentRequest {
    #[serde(default)]
    pub agent_id: Option<String>,
}

impl AssignAgentRequest {
    pub fn agent_id(self) -> Result<String, BookingError> {
        self.agent_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| BookingError::validation("agentId is required"))
    }
}

fn parse_tracked_status(raw: &str) -> Result<BookingStatus, BookingError> {
    BookingStatus::parse_tracked(raw).ok_or_else(|| {
        let expected: Vec<&str> = BookingStatus::TRACKED.iter().map(|s| s.as_str()).collect();
        BookingError::validation(format!(
            "Invalid status '{}'. Expected one of: {}",
            raw,
            expected.join(", ")
        ))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response of a successful agent assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignAgentResponse {
    pub success: bool,
    pub data: Value,
}

/// Response of a successful cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
