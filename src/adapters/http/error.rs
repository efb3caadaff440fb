//! HTTP error mapping.
//!
//! Every failure is answered with `{"error": "<message>"}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::booking::BookingError;
use crate::domain::membership::InquiryError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let status = match &err {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Upstream(_) | BookingError::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<InquiryError> for ApiError {
    fn from(err: InquiryError) -> Self {
        let status = match &err {
            InquiryError::Validation(_) => StatusCode::BAD_REQUEST,
            InquiryError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    /// Joins every field message, ordered by field name.
    fn from(errors: validator::ValidationErrors) -> Self {
        let by_field: BTreeMap<String, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid {}", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        let joined = by_field.into_values().flatten().collect::<Vec<_>>().join("; ");
        Self::bad_request(format!("Validation error: {}", joined))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Name is required"))]
        name: String,
        #[validate(length(min = 10, message = "Valid phone number is required"))]
        phone: String,
    }

    #[test]
    fn booking_errors_map_to_statuses() {
        let cases = [
            (BookingError::validation("bad"), StatusCode::BAD_REQUEST),
            (BookingError::not_found("Booking not found"), StatusCode::NOT_FOUND),
            (BookingError::upstream("CRM API returned 502"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                BookingError::storage("Failed to create booking", DomainError::database("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn storage_errors_hide_the_cause() {
        let err = ApiError::from(BookingError::storage(
            "Failed to create booking",
            DomainError::database("connection refused"),
        ));
        assert_eq!(err.message(), "Failed to create booking");
    }

    #[test]
    fn validation_messages_are_joined_in_field_order() {
        let errors = Sample {
            name: "K".into(),
            phone: "555".into(),
        }
        .validate()
        .unwrap_err();

        let err = ApiError::from(errors);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Validation error: Name is required; Valid phone number is required"
        );
    }
}
