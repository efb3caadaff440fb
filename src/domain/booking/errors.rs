//! Booking-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | Upstream | 500 |
//! | Storage | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by the booking request handlers.
///
/// Every variant carries the message shown to the client. Storage errors
/// keep the underlying cause for logging only.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),

    /// Neither the CRM nor local storage knows the booking.
    #[error("{0}")]
    NotFound(String),

    /// The CRM refused or could not complete a CRM-only operation.
    #[error("{0}")]
    Upstream(String),

    /// Local persistence failed.
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: DomainError,
    },
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BookingError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        BookingError::Upstream(message.into())
    }

    pub fn storage(message: impl Into<String>, source: DomainError) -> Self {
        BookingError::Storage {
            message: message.into(),
            source,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Validation(_) => ErrorCode::ValidationFailed,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::Upstream(_) => ErrorCode::InternalError,
            BookingError::Storage { source, .. } => source.code,
        }
    }
}
