//! Membership domain - signup inquiries for the roadside membership plans.
//!
//! Inquiries are forwarded to the CRM and kept locally; nothing here tracks
//! an actual membership.

mod errors;
mod inquiry;
mod plan;

pub use errors::InquiryError;
pub use inquiry::{MembershipInquiry, NewMembershipInquiry, INQUIRY_PENDING};
pub use plan::PlanType;
