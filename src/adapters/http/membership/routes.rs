//! Axum router configuration for membership inquiry endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{list_inquiries, submit_inquiry};

/// Inquiry routes, mounted at `/api/membership-inquiries`.
///
/// # Routes
/// - `GET /` - List inquiries
/// - `POST /` - Submit an inquiry
pub fn membership_routes() -> Router<AppState> {
    Router::new().route("/", get(list_inquiries).post(submit_inquiry))
}
