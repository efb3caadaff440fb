//! Booking domain - roadside-assistance requests and their CRM representation.
//!
//! A booking lives in two places: a local row owned by this service and a
//! task in the dispatch CRM, which owns status, agent assignment and live
//! location. This module holds the pure translation between the two.

mod aggregate;
mod crm_task;
mod errors;
pub mod phone;
pub mod status;
mod vehicle;

pub use aggregate::{generate_booking_number, Booking, NewBooking, BOOKING_NUMBER_PREFIX};
pub use crm_task::{
    is_truthy, merge_status_update, AgentLocation, BookingRecord, BookingView,
    DEFAULT_SERVICE_TYPE,
};
pub use errors::BookingError;
pub use status::{crm_status_from_value, crm_to_ui, ui_to_crm, BookingStatus};
pub use vehicle::VehicleDescription;
