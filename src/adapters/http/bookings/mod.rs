//! HTTP adapter for booking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssignAgentRequest, CreateBookingRequest, UpdateStatusRequest};
pub use routes::booking_routes;
