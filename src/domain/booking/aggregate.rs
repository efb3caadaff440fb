//! Booking aggregate - the local record of a roadside-assistance request.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::status::BookingStatus;
use super::vehicle::VehicleDescription;

/// Prefix of every locally generated booking number.
pub const BOOKING_NUMBER_PREFIX: &str = "BK-";

/// Generates a human-facing booking number, `BK-` plus four random digits.
///
/// Only ten thousand values exist, so collisions are possible. The storage
/// layer rejects duplicates instead of retrying.
pub fn generate_booking_number() -> String {
    let n: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{:04}", BOOKING_NUMBER_PREFIX, n)
}

/// Validated input for a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub name: String,
    pub phone: String,
    pub vehicle: VehicleDescription,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub service_type: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    /// Remote task id, when the CRM accepted the booking.
    pub crm_task_id: Option<String>,
}

impl NewBooking {
    /// Attaches the CRM task id returned by the create call.
    pub fn with_crm_task_id(mut self, task_id: Option<String>) -> Self {
        self.crm_task_id = task_id;
        self
    }
}

/// A persisted booking row.
///
/// `agent_name` and `agent_phone` are never set by this service; the columns
/// exist for rows reconciled from CRM data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub booking_number: String,
    pub crm_task_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub pickup_location: String,
    pub dropoff_location: Option<String>,
    pub service_type: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Builds the row for a new booking once storage has assigned its id.
    pub fn from_new(id: i32, booking_number: String, new: NewBooking, now: Timestamp) -> Self {
        Self {
            id,
            booking_number,
            crm_task_id: new.crm_task_id,
            name: new.name,
            phone: new.phone,
            vehicle_make: new.vehicle.make,
            vehicle_model: new.vehicle.model,
            vehicle_color: new.vehicle.color,
            pickup_location: new.pickup_location,
            dropoff_location: new.dropoff_location,
            service_type: new.service_type,
            notes: new.notes,
            status: new.status,
            agent_name: None,
            agent_phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn vehicle(&self) -> VehicleDescription {
        VehicleDescription::new(
            self.vehicle_make.clone(),
            self.vehicle_model.clone(),
            self.vehicle_color.clone(),
        )
    }

    /// Sets a new status and bumps `updated_at`. Any transition is allowed.
    pub fn set_status(&mut self, status: BookingStatus, now: Timestamp) {
        self.status = status;
        self.updated_at = now;
    }
}
