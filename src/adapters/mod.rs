//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `crm` - Dispatch CRM over HTTP, plus an in-process mock
//! - `postgres` - Booking and inquiry storage in PostgreSQL
//! - `memory` - In-memory storage for tests and local runs
//! - `http` - The REST API

pub mod crm;
pub mod http;
pub mod memory;
pub mod postgres;
