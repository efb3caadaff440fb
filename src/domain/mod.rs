//! Domain layer - pure business types with no I/O.
//!
//! - `foundation` - shared primitives (errors, timestamps)
//! - `booking` - bookings, status mapping and CRM reshaping
//! - `membership` - membership signup inquiries

pub mod booking;
pub mod foundation;
pub mod membership;
