//! Membership inquiry repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::membership::{MembershipInquiry, NewMembershipInquiry};

/// Repository port for membership inquiries. Inquiries are append-only.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Store a new inquiry in `pending` status.
    async fn create(
        &self,
        inquiry: NewMembershipInquiry,
        crm_task_id: Option<String>,
    ) -> Result<MembershipInquiry, DomainError>;

    /// All inquiries, newest first.
    async fn list_all(&self) -> Result<Vec<MembershipInquiry>, DomainError>;
}
