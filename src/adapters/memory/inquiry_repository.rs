//! In-memory membership inquiry storage.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::membership::{MembershipInquiry, NewMembershipInquiry};
use crate::ports::InquiryRepository;

/// In-memory implementation of the InquiryRepository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInquiryRepository {
    rows: Arc<RwLock<Vec<MembershipInquiry>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails with a database error.
    pub fn failing() -> Self {
        let repo = Self::new();
        repo.failing.store(true, Ordering::SeqCst);
        repo
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::database("Database unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn create(
        &self,
        inquiry: NewMembershipInquiry,
        crm_task_id: Option<String>,
    ) -> Result<MembershipInquiry, DomainError> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        let id = rows.len() as i32 + 1;
        let created = MembershipInquiry::from_new(id, inquiry, crm_task_id, Timestamp::now());
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<MembershipInquiry>, DomainError> {
        self.check_available()?;
        Ok(self.rows.read().await.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{PlanType, INQUIRY_PENDING};

    #[tokio::test]
    async fn created_inquiries_start_pending_and_list_newest_first() {
        let repo = InMemoryInquiryRepository::new();
        for name in ["Malia Akana", "Leilani Kahale"] {
            repo.create(
                NewMembershipInquiry {
                    name: name.to_string(),
                    email: "ohana@example.com".to_string(),
                    phone: "8085550142".to_string(),
                    plan_type: PlanType::Premium,
                    message: None,
                },
                Some("inquiry-1".to_string()),
            )
            .await
            .unwrap();
        }

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].name, "Leilani Kahale");
        assert!(all.iter().all(|i| i.status == INQUIRY_PENDING));
        assert_eq!(all[1].crm_task_id.as_deref(), Some("inquiry-1"));
    }
}
