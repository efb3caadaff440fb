//! GetFleetHandler - Query handler for the tow fleet roster.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::booking::BookingError;
use crate::ports::DispatchCrm;

use crate::application::handlers::booking::upstream_message;

#[derive(Debug, Clone, Default)]
pub struct GetFleetQuery;

pub struct GetFleetHandler {
    crm: Arc<dyn DispatchCrm>,
}

impl GetFleetHandler {
    pub fn new(crm: Arc<dyn DispatchCrm>) -> Self {
        Self { crm }
    }

    pub async fn handle(&self, _query: GetFleetQuery) -> Result<Value, BookingError> {
        self.crm.get_fleet().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch fleet");
            BookingError::upstream(upstream_message(&e, "Failed to fetch fleet"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::crm::MockDispatchCrm;
    use serde_json::json;

    #[tokio::test]
    async fn lists_agents() {
        let crm = MockDispatchCrm::new();
        crm.add_agent(json!({ "agent_id": "AG-1", "truck_number": "T-12" }));
        crm.add_agent(json!({ "agent_id": "AG-2", "truck_number": "T-14" }));
        let handler = GetFleetHandler::new(Arc::new(crm));

        let fleet = handler.handle(GetFleetQuery).await.unwrap();
        assert_eq!(fleet["total"], 2);
        assert_eq!(fleet["fleet"][1]["truck_number"], "T-14");
    }

    #[tokio::test]
    async fn unreachable_crm_is_upstream_error() {
        let handler = GetFleetHandler::new(Arc::new(MockDispatchCrm::unreachable()));
        let err = handler.handle(GetFleetQuery).await.unwrap_err();
        assert!(matches!(err, BookingError::Upstream(_)));
        assert_eq!(err.to_string(), "Failed to connect to CRM");
    }
}
