//! HTTP adapter for membership inquiry endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::SubmitInquiryRequest;
pub use routes::membership_routes;
