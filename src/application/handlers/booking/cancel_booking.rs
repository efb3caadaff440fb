//! CancelBookingHandler - Command handler for cancelling a CRM task.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::ports::DispatchCrm;

use super::assign_agent::upstream_message;

/// Command to cancel a booking's CRM task.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub task_id: String,
}

/// Soft-deletes the CRM task. The local row, if any, is kept as-is.
pub struct CancelBookingHandler {
    crm: Arc<dyn DispatchCrm>,
}

impl CancelBookingHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>) -> Self {
        Self { crm }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<(), BookingError> {
        self.crm
            .delete_task(&cmd.task_id, false)
            .await
            .map_err(|e| {
                tracing::error!(task_id = %cmd.task_id, error = %e, "Failed to delete task");
                BookingError::upstream(upstream_message(&e, "Failed to delete task"))
            })?;

        tracing::info!(task_id = %cmd.task_id, "Task cancelled");
        Ok(())
    }
}
