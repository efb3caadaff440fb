//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write to the CRM and local storage; query handlers read
//! from the CRM first and fall back to local rows where a fallback exists.

pub mod handlers;

pub use handlers::booking::{
    AssignAgentCommand, AssignAgentHandler, CancelBookingCommand, CancelBookingHandler,
    CreateBookingCommand, CreateBookingHandler, FindBookingByPhoneHandler,
    FindBookingByPhoneQuery, GetBookingByTaskHandler, GetBookingByTaskQuery, ListBookingsHandler,
    ListBookingsQuery, StatusUpdateOutcome, UpdateBookingStatusCommand,
    UpdateBookingStatusHandler,
};
pub use handlers::dispatch::{
    GetAgentLocationHandler, GetAgentLocationQuery, GetFleetHandler, GetFleetQuery,
};
pub use handlers::membership::{
    ListInquiriesHandler, ListInquiriesQuery, SubmitInquiryCommand, SubmitInquiryHandler,
};
