//! Dispatch CRM adapters.
//!
//! - `HttpDispatchCrm` - REST client for the live CRM
//! - `MockDispatchCrm` - In-process CRM for tests

mod http_client;
mod mock;

pub use http_client::{normalize_envelope, CrmClientConfig, HttpDispatchCrm};
pub use mock::{CrmCall, MockDispatchCrm};
