#![expect(clippy::unwrap_used, reason = "test code")]

use agora_core::NudgeState;
use chrono::{Duration, Utc};

use super::{create_test_room, create_test_storage, create_test_user};

#[test]
fn save_creates_then_updates() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let room = create_test_room(&storage, "ROOM30", now);
    let user = create_test_user(&storage, "ada", now);

    assert!(storage.nudge_state(room.id, user.id, Some(0)).unwrap().is_none());

    let mut state = NudgeState::new(room.id, user.id, Some(0), now);
    state.flagged_count = 1;
    storage.save_nudge_state(&state).unwrap();

    let loaded = storage.nudge_state(room.id, user.id, Some(0)).unwrap().unwrap();
    assert_eq!(loaded.flagged_count, 1);
    assert_eq!(loaded.last_nudged_at.unwrap().timestamp(), now.timestamp());

    state.flagged_count = 2;
    state.last_nudged_at = Some(now + Duration::seconds(95));
    storage.save_nudge_state(&state).unwrap();

    let loaded = storage.nudge_state(room.id, user.id, Some(0)).unwrap().unwrap();
    assert_eq!(loaded.flagged_count, 2);
    assert_eq!(
        loaded.last_nudged_at.unwrap().timestamp(),
        (now + Duration::seconds(95)).timestamp()
    );
}

#[test]
fn phase_partitions_the_key() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let room = create_test_room(&storage, "ROOM31", now);
    let user = create_test_user(&storage, "ada", now);

    let mut phase_zero = NudgeState::new(room.id, user.id, Some(0), now);
    phase_zero.flagged_count = 3;
    storage.save_nudge_state(&phase_zero).unwrap();

    let mut phaseless = NudgeState::new(room.id, user.id, None, now);
    phaseless.flagged_count = 1;
    storage.save_nudge_state(&phaseless).unwrap();

    assert_eq!(storage.nudge_state(room.id, user.id, Some(0)).unwrap().unwrap().flagged_count, 3);
    assert_eq!(storage.nudge_state(room.id, user.id, None).unwrap().unwrap().flagged_count, 1);
    assert!(storage.nudge_state(room.id, user.id, Some(1)).unwrap().is_none());

    // Updating the null-phase row must not touch the phase-zero row.
    phaseless.flagged_count = 2;
    storage.save_nudge_state(&phaseless).unwrap();
    assert_eq!(storage.nudge_state(room.id, user.id, Some(0)).unwrap().unwrap().flagged_count, 3);
    assert_eq!(storage.nudge_state(room.id, user.id, None).unwrap().unwrap().flagged_count, 2);
}
