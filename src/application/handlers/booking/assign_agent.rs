//! AssignAgentHandler - Command handler for dispatching an agent to a task.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::booking::BookingError;
use crate::ports::{CrmError, DispatchCrm};

/// Command to assign an agent to a CRM task.
#[derive(Debug, Clone)]
pub struct AssignAgentCommand {
    pub task_id: String,
    pub agent_id: String,
}

/// Assigns an agent through the CRM. Nothing is stored locally.
pub struct AssignAgentHandler {
    crm: Arc<dyn DispatchCrm>,
}

impl AssignAgentHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>) -> Self {
        Self { crm }
    }

    /// Returns the CRM's response data.
    pub async fn handle(&self, cmd: AssignAgentCommand) -> Result<Value, BookingError> {
        self.crm
            .assign_agent(&cmd.task_id, &cmd.agent_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    task_id = %cmd.task_id,
                    agent_id = %cmd.agent_id,
                    error = %e,
                    "Failed to assign agent"
                );
                BookingError::upstream(upstream_message(&e, "Failed to assign agent"))
            })
    }
}

/// Text shown to clients for a failed CRM-only operation.
pub(crate) fn upstream_message(error: &CrmError, fallback: &str) -> String {
    let message = error.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
