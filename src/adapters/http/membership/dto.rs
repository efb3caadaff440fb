//! HTTP DTOs for membership inquiry endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::membership::{InquiryError, NewMembershipInquiry, PlanType};

/// Body of `POST /api/membership-inquiries`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryRequest {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Valid phone number is required"))]
    pub phone: String,

    #[serde(default)]
    pub plan_type: String,

    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitInquiryRequest {
    pub fn into_new_inquiry(self) -> Result<NewMembershipInquiry, InquiryError> {
        let plan_type = PlanType::parse(&self.plan_type).ok_or_else(|| {
            let expected: Vec<&str> = PlanType::ALL.iter().map(|p| p.as_str()).collect();
            InquiryError::validation(format!(
                "Invalid plan type '{}'. Expected one of: {}",
                self.plan_type,
                expected.join(", ")
            ))
        })?;

        Ok(NewMembershipInquiry {
            name: self.name,
            email: self.email,
            phone: self.phone,
            plan_type,
            message: self.message,
        })
    }
}
