//! SubmitInquiryHandler - Command handler for membership signups.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::membership::{InquiryError, MembershipInquiry, NewMembershipInquiry};
use crate::ports::{DispatchCrm, InquiryRepository, InquiryType, MembershipInquiryRequest};

/// Command to submit a membership inquiry.
#[derive(Debug, Clone)]
pub struct SubmitInquiryCommand {
    pub inquiry: NewMembershipInquiry,
}

/// Forwards the inquiry to the CRM, then records it locally.
pub struct SubmitInquiryHandler {
    crm: Arc<dyn DispatchCrm>,
    inquiries: Arc<dyn InquiryRepository>,
}

impl SubmitInquiryHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>, inquiries: Arc<dyn InquiryRepository>) -> Self {
        Self { crm, inquiries }
    }

    pub async fn handle(&self, cmd: SubmitInquiryCommand) -> Result<MembershipInquiry, InquiryError> {
        let inquiry = cmd.inquiry;
        let request = MembershipInquiryRequest {
            customer_name: inquiry.name.clone(),
            customer_phone: inquiry.phone.clone(),
            customer_email: inquiry.email.clone(),
            plan_id: None,
            inquiry_type: InquiryType::Signup,
            vehicles: Vec::new(),
            notes: Some(inquiry.crm_notes()),
        };

        let (crm_task_id, crm_error) = match self.crm.membership_inquiry(request).await {
            Ok(response) => (
                response
                    .get("task_id")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                None,
            ),
            Err(e) => (None, Some(e)),
        };

        let stored = self
            .inquiries
            .create(inquiry, crm_task_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    crm_error = ?crm_error,
                    "Failed to store membership inquiry"
                );
                InquiryError::storage("Failed to submit membership inquiry", e)
            })?;

        if let Some(e) = crm_error {
            tracing::warn!(
                inquiry_id = stored.id,
                plan = %stored.plan_type,
                error = %e,
                "CRM membership inquiry failed, inquiry stored locally only"
            );
        }

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::MockDispatchCrm;
    use crate::adapters::memory::InMemoryInquiryRepository;
    use crate::application::handlers::log_capture::CapturedLogs;
    use crate::domain::membership::{PlanType, INQUIRY_PENDING};

    fn malia() -> NewMembershipInquiry {
        NewMembershipInquiry {
            name: "Malia Akana".to_string(),
            email: "malia@example.com".to_string(),
            phone: "808-555-0142".to_string(),
            plan_type: PlanType::Ohana,
            message: Some("Two cars and a moped".to_string()),
        }
    }

    #[tokio::test]
    async fn sends_signup_with_plan_notes() {
        let crm = MockDispatchCrm::new();
        let handler = SubmitInquiryHandler::new(
            Arc::new(crm.clone()),
            Arc::new(InMemoryInquiryRepository::new()),
        );

        let stored = handler
            .handle(SubmitInquiryCommand { inquiry: malia() })
            .await
            .unwrap();

        let sent = &crm.inquiries()[0];
        assert_eq!(sent.inquiry_type, InquiryType::Signup);
        assert_eq!(
            sent.notes.as_deref(),
            Some("Plan: Ohana ($59/mo)\nTwo cars and a moped")
        );
        assert!(stored.crm_task_id.is_some());
        assert_eq!(stored.status, INQUIRY_PENDING);
    }

    #[tokio::test]
    async fn crm_failure_still_stores_inquiry() {
        let handler = SubmitInquiryHandler::new(
            Arc::new(MockDispatchCrm::unreachable()),
            Arc::new(InMemoryInquiryRepository::new()),
        );

        let stored = handler
            .handle(SubmitInquiryCommand { inquiry: malia() })
            .await
            .unwrap();
        assert!(stored.crm_task_id.is_none());
    }

    #[tokio::test]
    async fn crm_failure_warning_names_the_stored_inquiry() {
        let (logs, _guard) = CapturedLogs::install();
        let handler = SubmitInquiryHandler::new(
            Arc::new(MockDispatchCrm::unreachable()),
            Arc::new(InMemoryInquiryRepository::new()),
        );

        let stored = handler
            .handle(SubmitInquiryCommand { inquiry: malia() })
            .await
            .unwrap();

        let warnings = logs.events_at("WARN");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0]["fields"]["inquiry_id"], stored.id);
        assert!(warnings[0]["fields"]["error"].is_string());
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let handler = SubmitInquiryHandler::new(
            Arc::new(MockDispatchCrm::new()),
            Arc::new(InMemoryInquiryRepository::failing()),
        );

        let err = handler
            .handle(SubmitInquiryCommand { inquiry: malia() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to submit membership inquiry");
    }
}
