//! HTTP handlers for membership inquiry endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::application::{ListInquiriesQuery, SubmitInquiryCommand};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::SubmitInquiryRequest;

/// POST /api/membership-inquiries - Ask to join a membership plan
pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<SubmitInquiryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let cmd = SubmitInquiryCommand {
        inquiry: request.into_new_inquiry()?,
    };
    let inquiry = state.submit_inquiry_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// GET /api/membership-inquiries - All inquiries, newest first
pub async fn list_inquiries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let inquiries = state.list_inquiries_handler().handle(ListInquiriesQuery).await?;
    Ok(Json(inquiries))
}
