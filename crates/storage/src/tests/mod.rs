//! Test utilities and module declarations for storage tests.

use agora_core::{PostDraft, Room, User, UserRole};
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::Storage;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_user(storage: &Storage, name: &str, now: DateTime<Utc>) -> User {
    storage.create_user(&format!("{name}-user"), name, UserRole::Learner, now).unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_room(storage: &Storage, code: &str, now: DateTime<Utc>) -> Room {
    storage.create_room(code, "Test room", now).unwrap()
}

pub fn post_draft(room: &Room, author_id: i64, content: &str, at: DateTime<Utc>) -> PostDraft {
    PostDraft {
        room_id: room.id,
        author_id,
        content: content.to_owned(),
        created_at: at,
        phase_index: Some(0),
        activity_run_id: room.activity_run_id.clone(),
        lacks_evidence: false,
    }
}

mod nudge_tests;
mod room_tests;
