//! Membership inquiry handlers.

mod list_inquiries;
mod submit_inquiry;

pub use list_inquiries::{ListInquiriesHandler, ListInquiriesQuery};
pub use submit_inquiry::{SubmitInquiryCommand, SubmitInquiryHandler};
