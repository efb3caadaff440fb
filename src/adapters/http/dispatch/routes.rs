//! Axum router configuration for dispatch endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{get_agent_location, get_fleet};

/// Dispatch routes, mounted at `/api`.
pub fn dispatch_routes() -> Router<AppState> {
    Router::new()
        .route("/agents/:agent_id/location", get(get_agent_location))
        .route("/fleet", get(get_fleet))
}
