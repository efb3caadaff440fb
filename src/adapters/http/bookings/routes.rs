//! Axum router configuration for booking endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    assign_agent, cancel_booking, create_booking, get_booking_by_phone, get_booking_by_task,
    list_bookings, update_booking_status,
};

/// Booking routes, mounted at `/api/bookings`.
///
/// # Routes
/// - `GET /` - List bookings
/// - `POST /` - Create a booking
/// - `GET /phone/:phone` - Lookup by phone number
/// - `GET /task/:task_id` - Lookup by CRM task
/// - `PATCH /:id/status` - Update status
/// - `POST /:id/assign` - Assign an agent
/// - `DELETE /:id` - Cancel
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/phone/:phone", get(get_booking_by_phone))
        .route("/task/:task_id", get(get_booking_by_task))
        .route("/:id/status", patch(update_booking_status))
        .route("/:id/assign", post(assign_agent))
        .route("/:id", delete(cancel_booking))
}
