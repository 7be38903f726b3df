//! Rule dispatcher.
//!
//! Orchestrates which rules run on which triggers and aggregates the
//! fired rule names. Rules are independent: a failure in one is logged
//! and the rest still run.

use std::sync::Arc;

use agora_core::{AgentRegistry, EngineStore, Post, Room};
use chrono::{DateTime, Utc};

use crate::rules::{equity, evidence, inactivity};

/// The intervention rule engine, generic over its backing store.
pub struct RuleEngine<S: ?Sized> {
    store: Arc<S>,
    agents: AgentRegistry,
}

impl<S: EngineStore + ?Sized> RuleEngine<S> {
    pub fn new(store: Arc<S>, agents: AgentRegistry) -> Self {
        Self { store, agents }
    }

    /// Run the on-post rules for a freshly created post: equity scoped to
    /// the post's phase, then evidence scoped to the post itself.
    pub fn run_on_post(&self, room: &Room, post: &Post) -> Vec<String> {
        self.run_on_post_at(room, post, Utc::now())
    }

    /// [`Self::run_on_post`] with an explicit clock, for tests.
    pub fn run_on_post_at(&self, room: &Room, post: &Post, now: DateTime<Utc>) -> Vec<String> {
        let mut fired = Vec::new();
        match equity::evaluate(self.store.as_ref(), &self.agents, room, post.phase_index, now) {
            Ok(names) => fired.extend(names),
            Err(e) => {
                tracing::error!(room_id = room.id, error = %e, "equity rule failed");
            },
        }
        match evidence::evaluate(self.store.as_ref(), &self.agents, room, post, now) {
            Ok(names) => fired.extend(names),
            Err(e) => {
                tracing::error!(room_id = room.id, error = %e, "evidence rule failed");
            },
        }
        fired
    }

    /// Run the poll-triggered rules. Piggybacked on feed reads so
    /// time-based nudges surface without requiring new posts; there is no
    /// background scheduler.
    pub fn run_on_poll(&self, room: &Room, phase_index: Option<u32>) -> Vec<String> {
        self.run_on_poll_at(room, phase_index, Utc::now())
    }

    /// [`Self::run_on_poll`] with an explicit clock, for tests.
    pub fn run_on_poll_at(
        &self,
        room: &Room,
        phase_index: Option<u32>,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        match inactivity::evaluate(self.store.as_ref(), &self.agents, room, phase_index, now) {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(room_id = room.id, error = %e, "inactivity rule failed");
                Vec::new()
            },
        }
    }
}
