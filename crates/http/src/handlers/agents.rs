use std::sync::Arc;

use axum::{Json, extract::State};

use crate::AppState;
use crate::api_types::AgentListing;

/// The configured agent registry, as injected into the engine at startup.
pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<AgentListing> {
    Json(AgentListing {
        agents: state.agents.profiles().into_iter().cloned().collect(),
    })
}
