//! HTTP adapter for agent and fleet endpoints.

mod handlers;
mod routes;

pub use routes::dispatch_routes;
