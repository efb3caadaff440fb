//! GetAgentLocationHandler - Query handler for live agent position.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::booking::BookingError;
use crate::ports::{AgentLookup, DispatchCrm};

/// Query for an agent, by agent id or by the task they work.
#[derive(Debug, Clone)]
pub struct GetAgentLocationQuery {
    pub lookup: AgentLookup,
}

pub struct GetAgentLocationHandler {
    crm: Arc<dyn DispatchCrm>,
}

impl GetAgentLocationHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>) -> Self {
        Self { crm }
    }

    pub async fn handle(&self, query: GetAgentLocationQuery) -> Result<Value, BookingError> {
        self.crm.get_agent_location(query.lookup).await.map_err(|e| {
            tracing::debug!(error = %e, "Agent location lookup failed");
            BookingError::not_found("Agent location not found")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::MockDispatchCrm;
    use serde_json::json;

    #[tokio::test]
    async fn returns_agent_record() {
        let crm = MockDispatchCrm::new();
        crm.add_agent(json!({ "agent_id": "AG-7", "current_lat": "21.29", "current_lng": "-157.84" }));
        let handler = GetAgentLocationHandler::new(Arc::new(crm));

        let agent = handler
            .handle(GetAgentLocationQuery {
                lookup: AgentLookup::infer("AG-7"),
            })
            .await
            .unwrap();
        assert_eq!(agent["current_lng"], "-157.84");
    }

    #[tokio::test]
    async fn unknown_agent_is_not_found() {
        let handler = GetAgentLocationHandler::new(Arc::new(MockDispatchCrm::new()));

        let err = handler
            .handle(GetAgentLocationQuery {
                lookup: AgentLookup::infer("AG-404"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Agent location not found");
    }
}
