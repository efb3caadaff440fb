//! HTTP handlers for booking endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::Validate;

use crate::application::{
    AssignAgentCommand, CancelBookingCommand, CreateBookingCommand, FindBookingByPhoneQuery,
    GetBookingByTaskQuery, ListBookingsQuery, StatusUpdateOutcome, UpdateBookingStatusCommand,
};
use crate::ports::TaskLookup;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    AssignAgentRequest, AssignAgentResponse, CreateBookingRequest, SuccessResponse,
    UpdateStatusRequest,
};

/// POST /api/bookings - Book a tow or roadside service
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let cmd = CreateBookingCommand {
        booking: request.into_new_booking()?,
    };
    let booking = state.create_booking_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings - All bookings, CRM first
pub async fn list_bookings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let records = state.list_bookings_handler().handle(ListBookingsQuery).await?;
    Ok(Json(records))
}

/// GET /api/bookings/phone/:phone - Tracker lookup by phone number
pub async fn get_booking_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .find_booking_by_phone_handler()
        .handle(FindBookingByPhoneQuery { phone })
        .await?;
    Ok(Json(record))
}

/// GET /api/bookings/task/:task_id - Booking by CRM task id or job number
pub async fn get_booking_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetBookingByTaskQuery {
        lookup: TaskLookup::infer(&task_id),
    };
    let view = state.get_booking_by_task_handler().handle(query).await?;
    Ok(Json(view))
}

/// PATCH /api/bookings/:id/status - Move a booking along the tracker
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let cmd = UpdateBookingStatusCommand {
        id,
        status: request.status()?,
    };

    let response = match state.update_booking_status_handler().handle(cmd).await? {
        StatusUpdateOutcome::Remote(task) => Json(task).into_response(),
        StatusUpdateOutcome::Local(booking) => Json(booking).into_response(),
    };
    Ok(response)
}

/// POST /api/bookings/:id/assign - Dispatch an agent
pub async fn assign_agent(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<AssignAgentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = AssignAgentCommand {
        task_id,
        agent_id: request.agent_id()?,
    };

    let data = state.assign_agent_handler().handle(cmd).await?;
    Ok(Json(AssignAgentResponse {
        success: true,
        data,
    }))
}

/// DELETE /api/bookings/:id - Cancel the CRM task
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .cancel_booking_handler()
        .handle(CancelBookingCommand { task_id })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}
