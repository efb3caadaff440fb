//! Membership inquiry error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Storage | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by the membership inquiry handlers.
#[derive(Debug, Clone, Error)]
pub enum InquiryError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: DomainError,
    },
}

impl InquiryError {
    pub fn validation(message: impl Into<String>) -> Self {
        InquiryError::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>, source: DomainError) -> Self {
        InquiryError::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InquiryError::Validation(_) => ErrorCode::ValidationFailed,
            InquiryError::Storage { source, .. } => source.code,
        }
    }
}
