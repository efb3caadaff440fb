//! In-memory repositories.
//!
//! Used by tests and for running the service without a database.

mod booking_repository;
mod inquiry_repository;

pub use booking_repository::InMemoryBookingRepository;
pub use inquiry_repository::InMemoryInquiryRepository;
