//! HTTP API server for agora.
//!
//! Thin plumbing over the storage and engine crates: request parsing,
//! the feed merge, and the poll side effect live here; all decision
//! logic stays in `agora-engine`.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]

pub mod api_error;
mod api_types;
mod blocking;
mod handlers;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use agora_core::AgentRegistry;
use agora_engine::RuleEngine;
use agora_storage::Storage;

pub use api_types::{
    ActivityStartRequest, AgentListing, FeedItem, PostMessageRequest, PostMessageResponse,
    RoomActionRequest, RoomSummary, TempLoginRequest,
};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub storage: Arc<Storage>,
    pub engine: Arc<RuleEngine<Storage>>,
    pub agents: AgentRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<Storage>, agents: AgentRegistry) -> Self {
        let engine = Arc::new(RuleEngine::new(Arc::clone(&storage), agents.clone()));
        Self { storage, engine, agents }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/temp-login", post(handlers::auth::temp_login))
        .route("/api/rooms", post(handlers::rooms::rooms))
        .route(
            "/api/messages",
            get(handlers::messages::feed).post(handlers::messages::post_message),
        )
        .route("/api/activity", post(handlers::activity::start_activity))
        .route("/api/agents", get(handlers::agents::list_agents))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
