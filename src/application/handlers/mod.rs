//! Application handlers.
//!
//! Command and query handlers that orchestrate the CRM and local storage.

pub mod booking;
pub mod dispatch;
pub mod membership;

#[cfg(test)]
pub(crate) mod log_capture;
