#![expect(clippy::unwrap_used, reason = "test code")]

use chrono::{Duration, Utc};

use super::{create_test_room, create_test_storage, create_test_user};
use crate::StorageError;

#[test]
fn create_and_fetch_room_by_code() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let room = create_test_room(&storage, "ABC123", now);

    let fetched = storage.room_by_code("ABC123").unwrap().unwrap();
    assert_eq!(fetched.id, room.id);
    assert_eq!(fetched.name, "Test room");
    assert!(fetched.activity_started_at.is_none());
    assert!(fetched.phase_durations.is_empty());
    assert!(!fetched.activity_run_id.is_empty());

    assert!(storage.room_by_code("NOSUCH").unwrap().is_none());
}

#[test]
fn duplicate_room_code_is_rejected() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    create_test_room(&storage, "SAME00", now);
    let err = storage.create_room("SAME00", "Other", now).unwrap_err();
    assert!(err.is_duplicate());
}

#[test]
fn membership_is_idempotent_and_keeps_join_timestamp() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let room = create_test_room(&storage, "ROOM01", now);
    let user = create_test_user(&storage, "ada", now);

    storage.add_member(room.id, user.id, now).unwrap();
    // Re-joining later must not move the original join timestamp.
    storage.add_member(room.id, user.id, now + Duration::seconds(600)).unwrap();

    let members = storage.members(room.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, user.id);
    assert_eq!(members[0].display_name, "ada");
    assert_eq!(members[0].joined_at.timestamp(), now.timestamp());
}

#[test]
fn start_activity_regenerates_the_run_id() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let room = create_test_room(&storage, "ROOM02", now);
    let original_run = room.activity_run_id.clone();

    let started = storage.start_activity(room.id, &[60, 120], now).unwrap();
    assert_ne!(started.activity_run_id, original_run);
    assert_eq!(started.phase_durations, vec![60, 120]);
    assert_eq!(started.activity_started_at.unwrap().timestamp(), now.timestamp());

    let restarted = storage.start_activity(room.id, &[30], now + Duration::seconds(10)).unwrap();
    assert_ne!(restarted.activity_run_id, started.activity_run_id);
    assert_eq!(storage.activity_run_id(room.id).unwrap(), restarted.activity_run_id);
}

#[test]
fn start_activity_on_missing_room_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.start_activity(999, &[60], Utc::now()).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "room", .. }));
}
