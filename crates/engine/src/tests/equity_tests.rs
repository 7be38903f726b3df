#![expect(clippy::unwrap_used, reason = "test code")]

use agora_core::AgentRegistry;
use chrono::{Duration, Utc};

use super::{append_post, create_test_storage, room_with_members};
use crate::rules::equity;

// Content with a digit: invisible to the evidence classifier, so these
// tests exercise equity in isolation.
const FILLER: &str = "point number 1";

#[test]
fn flags_the_member_below_half_the_average() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "EQ1", &["a", "b"], joined);

    // Three posts total, all by member a: expected average 1.5, threshold 0.75.
    for _ in 0..3 {
        append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    }

    let fired =
        equity::evaluate(storage.as_ref(), &AgentRegistry::with_defaults(), &room, Some(0), now)
            .unwrap();
    assert_eq!(fired, vec![format!("unequal_participation:user={}", users[1].id)]);

    let interventions = storage.interventions_in_room(room.id).unwrap();
    assert_eq!(interventions.len(), 1);
    assert_eq!(interventions[0].phase_index, Some(0));
    // The message names the member's actual count and the threshold.
    assert!(interventions[0].message.contains('0'));
    assert!(interventions[0].message.contains("0.8") || interventions[0].message.contains("0.7"));
}

#[test]
fn one_post_clears_the_threshold() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "EQ2", &["a", "b"], joined);

    // a: 2 posts, b: 1 post. Threshold 0.75 — nobody is below it.
    append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    append_post(&storage, &room, &users[1], FILLER, Some(0), now);

    let fired =
        equity::evaluate(storage.as_ref(), &AgentRegistry::with_defaults(), &room, Some(0), now)
            .unwrap();
    assert!(fired.is_empty());
}

#[test]
fn too_little_signal_is_a_no_op() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let agents = AgentRegistry::with_defaults();

    // Only two posts.
    let (room, users) = room_with_members(&storage, "EQ3", &["a", "b"], joined);
    append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    assert!(equity::evaluate(storage.as_ref(), &agents, &room, Some(0), now).unwrap().is_empty());

    // Enough posts but a single member.
    let (solo_room, solo) = room_with_members(&storage, "EQ4", &["solo"], joined);
    for _ in 0..4 {
        append_post(&storage, &solo_room, &solo[0], FILLER, Some(0), now);
    }
    assert!(
        equity::evaluate(storage.as_ref(), &agents, &solo_room, Some(0), now).unwrap().is_empty()
    );
}

#[test]
fn several_members_can_fire_in_one_call() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "EQ5", &["a", "b", "c", "d"], joined);

    // a: 6 posts, others: 0. Expected average 1.5, threshold 0.75.
    for _ in 0..6 {
        append_post(&storage, &room, &users[0], FILLER, Some(2), now);
    }

    let fired =
        equity::evaluate(storage.as_ref(), &AgentRegistry::with_defaults(), &room, Some(2), now)
            .unwrap();
    assert_eq!(fired.len(), 3);
    assert!(!fired.contains(&format!("unequal_participation:user={}", users[0].id)));
}

#[test]
fn cooldown_holds_for_five_minutes() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "EQ6", &["a", "b"], joined);
    let agents = AgentRegistry::with_defaults();

    for _ in 0..3 {
        append_post(&storage, &room, &users[0], FILLER, Some(0), now);
    }

    assert_eq!(equity::evaluate(storage.as_ref(), &agents, &room, Some(0), now).unwrap().len(), 1);
    // Within the 5-minute cooldown: suppressed.
    let later = now + Duration::seconds(60);
    assert!(equity::evaluate(storage.as_ref(), &agents, &room, Some(0), later).unwrap().is_empty());
    // After it: fires again.
    let much_later = now + Duration::seconds(301);
    assert_eq!(
        equity::evaluate(storage.as_ref(), &agents, &room, Some(0), much_later).unwrap().len(),
        1
    );
}
