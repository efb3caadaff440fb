//! Membership inquiry - a prospective member asking to sign up.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::plan::PlanType;

/// Status every inquiry starts in. Inquiries are never transitioned.
pub const INQUIRY_PENDING: &str = "pending";

/// Validated input for a new inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembershipInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan_type: PlanType,
    pub message: Option<String>,
}

impl NewMembershipInquiry {
    /// Notes sent to the CRM: the plan label, then the customer's message.
    pub fn crm_notes(&self) -> String {
        format!(
            "Plan: {}\n{}",
            self.plan_type.label(),
            self.message.as_deref().unwrap_or_default()
        )
    }
}

/// A persisted membership inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipInquiry {
    pub id: i32,
    pub crm_task_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan_type: PlanType,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

impl MembershipInquiry {
    pub fn from_new(
        id: i32,
        new: NewMembershipInquiry,
        crm_task_id: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            crm_task_id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            plan_type: new.plan_type,
            message: new.message,
            status: INQUIRY_PENDING.to_string(),
            created_at: now,
        }
    }
}
