//! GetBookingByTaskHandler - Query handler for a single CRM task.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingView};
use crate::ports::{DispatchCrm, TaskLookup};

/// Query for a booking by CRM task id or job number.
#[derive(Debug, Clone)]
pub struct GetBookingByTaskQuery {
    pub lookup: TaskLookup,
}

/// Fetches a booking straight from the CRM. There is no local fallback.
pub struct GetBookingByTaskHandler {
    crm: Arc<dyn DispatchCrm>,
}

impl GetBookingByTaskHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>) -> Self {
        Self { crm }
    }

    pub async fn handle(&self, query: GetBookingByTaskQuery) -> Result<BookingView, BookingError> {
        let job = self.crm.get_job_details(query.lookup).await.map_err(|e| {
            tracing::debug!(error = %e, "CRM task lookup failed");
            BookingError::not_found("Task not found in CRM")
        })?;

        Ok(BookingView::from_crm_job(&job))
    }
}
