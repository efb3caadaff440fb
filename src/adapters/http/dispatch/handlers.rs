//! HTTP handlers for dispatch read endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::{GetAgentLocationQuery, GetFleetQuery};
use crate::ports::AgentLookup;

use super::super::error::ApiError;
use super::super::state::AppState;

/// GET /api/agents/:agent_id/location - Live agent position
///
/// The path segment may also be a task reference (`JOB-...` or a long task id).
pub async fn get_agent_location(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetAgentLocationQuery {
        lookup: AgentLookup::infer(&agent_id),
    };
    let agent = state.agent_location_handler().handle(query).await?;
    Ok(Json(agent))
}

/// GET /api/fleet - Tow fleet roster
pub async fn get_fleet(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let fleet = state.fleet_handler().handle(GetFleetQuery).await?;
    Ok(Json(fleet))
}
