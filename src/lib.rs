//! Roadside Dispatch - booking backend for a towing and roadside-assistance
//! service.
//!
//! Bookings and membership inquiries are accepted over HTTP, forwarded to the
//! dispatch CRM that owns job state, and kept in a local PostgreSQL copy that
//! serves reads when the CRM is unreachable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
