//! Test utilities and module declarations for engine tests.
//!
//! Rules run against a real SQLite storage in a temp directory, with the
//! clock driven explicitly through the `_at` entry points.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use agora_core::{AgentRegistry, Post, PostDraft, Room, User, UserRole, lacks_evidence};
use agora_storage::Storage;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::RuleEngine;

mod dispatcher_tests;
mod equity_tests;
mod evidence_tests;

pub fn create_test_storage() -> (Arc<Storage>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    (Arc::new(storage), temp_dir)
}

pub fn engine(storage: &Arc<Storage>) -> RuleEngine<Storage> {
    RuleEngine::new(Arc::clone(storage), AgentRegistry::with_defaults())
}

pub fn engine_with(storage: &Arc<Storage>, agents: AgentRegistry) -> RuleEngine<Storage> {
    RuleEngine::new(Arc::clone(storage), agents)
}

/// A room with `names.len()` members, all joined at `joined_at`.
pub fn room_with_members(
    storage: &Storage,
    code: &str,
    names: &[&str],
    joined_at: DateTime<Utc>,
) -> (Room, Vec<User>) {
    let room = storage.create_room(code, "Test room", joined_at).unwrap();
    let users = names
        .iter()
        .map(|name| {
            let user = storage
                .create_user(&format!("{code}-{name}"), name, UserRole::Learner, joined_at)
                .unwrap();
            storage.add_member(room.id, user.id, joined_at).unwrap();
            user
        })
        .collect();
    (room, users)
}

/// Append a post the way the message handler does: phase and run id
/// stamped from the room, evidence verdict from the shared classifier.
pub fn append_post(
    storage: &Storage,
    room: &Room,
    author: &User,
    content: &str,
    phase_index: Option<u32>,
    at: DateTime<Utc>,
) -> Post {
    storage
        .append_post(&PostDraft {
            room_id: room.id,
            author_id: author.id,
            content: content.to_owned(),
            created_at: at,
            phase_index,
            activity_run_id: room.activity_run_id.clone(),
            lacks_evidence: lacks_evidence(content),
        })
        .unwrap()
}

/// A message long enough to read as a claim, with no evidence exemptions.
pub const CLAIM: &str = "group work is always better than working alone";

/// A message the classifier treats as evidence-backed.
pub const SUPPORTED: &str = "group work is better because studies of teams show it";
