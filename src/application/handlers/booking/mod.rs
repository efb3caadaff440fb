//! Booking command and query handlers.
//!
//! Reads prefer the CRM and fall back to local rows; writes go to the CRM
//! first and keep a local copy where one exists.

mod assign_agent;
mod cancel_booking;
mod create_booking;
mod find_booking_by_phone;
mod get_booking_by_task;
mod list_bookings;
mod update_booking_status;

pub use assign_agent::{AssignAgentCommand, AssignAgentHandler};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use find_booking_by_phone::{FindBookingByPhoneHandler, FindBookingByPhoneQuery};
pub use get_booking_by_task::{GetBookingByTaskHandler, GetBookingByTaskQuery};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use update_booking_status::{
    StatusUpdateOutcome, UpdateBookingStatusCommand, UpdateBookingStatusHandler,
};

pub(crate) use assign_agent::upstream_message;
