//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresBookingRepository` - Local booking rows
//! - `PostgresInquiryRepository` - Membership inquiries

mod booking_repository;
mod inquiry_repository;

pub use booking_repository::PostgresBookingRepository;
pub use inquiry_repository::PostgresInquiryRepository;
