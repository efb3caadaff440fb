//! Dispatch read handlers. Both are CRM pass-throughs.

mod get_agent_location;
mod get_fleet;

pub use get_agent_location::{GetAgentLocationHandler, GetAgentLocationQuery};
pub use get_fleet::{GetFleetHandler, GetFleetQuery};
