//! ListInquiriesHandler - Query handler for membership inquiries.

use std::sync::Arc;

use crate::domain::membership::{InquiryError, MembershipInquiry};
use crate::ports::InquiryRepository;

/// Query for all inquiries, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListInquiriesQuery;

/// Lists inquiries from local storage only.
pub struct ListInquiriesHandler {
    inquiries: Arc<dyn InquiryRepository>,
}

impl ListInquiriesHandler {
    pub fn new(inquiries: Arc<dyn InquiryRepository>) -> Self {
        Self { inquiries }
    }

    pub async fn handle(&self, _query: ListInquiriesQuery) -> Result<Vec<MembershipInquiry>, InquiryError> {
        self.inquiries.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list membership inquiries");
            InquiryError::storage("Failed to fetch membership inquiries", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryInquiryRepository;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let handler = ListInquiriesHandler::new(Arc::new(InMemoryInquiryRepository::new()));
        assert!(handler.handle(ListInquiriesQuery).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let handler = ListInquiriesHandler::new(Arc::new(InMemoryInquiryRepository::failing()));
        let err = handler.handle(ListInquiriesQuery).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch membership inquiries");
    }
}
