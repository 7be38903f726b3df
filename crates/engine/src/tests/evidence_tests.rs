#![expect(clippy::unwrap_used, reason = "test code")]

use agora_core::{AgentRegistry, AgentRole};
use chrono::{DateTime, Duration, Utc};

use super::{CLAIM, SUPPORTED, append_post, create_test_storage, room_with_members};
use crate::rules::evidence;

fn run(
    storage: &std::sync::Arc<agora_storage::Storage>,
    agents: &AgentRegistry,
    room: &agora_core::Room,
    post: &agora_core::Post,
    now: DateTime<Utc>,
) -> Vec<String> {
    evidence::evaluate(storage.as_ref(), agents, room, post, now).unwrap()
}

#[test]
fn supported_posts_leave_no_trace() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let (room, users) = room_with_members(&storage, "EV1", &["a"], now - Duration::seconds(600));
    let agents = AgentRegistry::with_defaults();

    let post = append_post(&storage, &room, &users[0], SUPPORTED, Some(0), now);
    assert!(run(&storage, &agents, &room, &post, now).is_empty());
    // No nudge state is created for posts that pass the classifier.
    assert!(storage.nudge_state(room.id, users[0].id, Some(0)).unwrap().is_none());
}

#[test]
fn fires_on_the_third_claim_in_quick_succession() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let (room, users) = room_with_members(&storage, "EV2", &["a"], now - Duration::seconds(600));
    let agents = AgentRegistry::with_defaults();

    for (i, offset) in [0i64, 5, 10].iter().enumerate() {
        let at = now + Duration::seconds(*offset);
        let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
        let fired = run(&storage, &agents, &room, &post, at);
        if i < 2 {
            assert!(fired.is_empty(), "call {} should count silently", i + 1);
        } else {
            assert_eq!(fired, vec![format!("missing_evidence:user={}", users[0].id)]);
        }
    }

    let state = storage.nudge_state(room.id, users[0].id, Some(0)).unwrap().unwrap();
    assert_eq!(state.flagged_count, 3);

    let interventions = storage.interventions_in_room(room.id).unwrap();
    assert_eq!(interventions.len(), 1);
    assert_eq!(interventions[0].agent_name, "Socratic Agent");
    assert!(interventions[0].message.contains('a'));
}

#[test]
fn time_floor_fires_with_only_two_flags() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let (room, users) = room_with_members(&storage, "EV3", &["a"], now - Duration::seconds(600));
    let agents = AgentRegistry::with_defaults();

    let first = append_post(&storage, &room, &users[0], CLAIM, Some(0), now);
    assert!(run(&storage, &agents, &room, &first, now).is_empty());

    let later = now + Duration::seconds(91);
    let second = append_post(&storage, &room, &users[0], CLAIM, Some(0), later);
    assert_eq!(run(&storage, &agents, &room, &second, later).len(), 1);
}

#[test]
fn suppressed_agent_still_counts_flags() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let (room, users) = room_with_members(&storage, "EV4", &["a"], now - Duration::seconds(600));

    let mut muted = AgentRegistry::with_defaults();
    muted.deactivate(AgentRole::Socratic);

    for offset in [0i64, 5, 10] {
        let at = now + Duration::seconds(offset);
        let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
        assert!(run(&storage, &muted, &room, &post, at).is_empty());
    }
    // The cadence advanced while muted, interventions did not.
    let state = storage.nudge_state(room.id, users[0].id, Some(0)).unwrap().unwrap();
    assert_eq!(state.flagged_count, 3);
    assert!(storage.interventions_in_room(room.id).unwrap().is_empty());

    // Reactivated later: the silent counting picks up where it left off.
    let active = AgentRegistry::with_defaults();
    let at = now + Duration::seconds(200);
    let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
    assert_eq!(run(&storage, &active, &room, &post, at).len(), 1);
}

#[test]
fn phase_partitions_the_cadence() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let (room, users) = room_with_members(&storage, "EV5", &["a"], now - Duration::seconds(600));
    let agents = AgentRegistry::with_defaults();

    for phase in [Some(0), Some(1)] {
        for offset in [0i64, 5] {
            let at = now + Duration::seconds(offset);
            let post = append_post(&storage, &room, &users[0], CLAIM, phase, at);
            assert!(run(&storage, &agents, &room, &post, at).is_empty());
        }
    }

    assert_eq!(storage.nudge_state(room.id, users[0].id, Some(0)).unwrap().unwrap().flagged_count, 2);
    assert_eq!(storage.nudge_state(room.id, users[0].id, Some(1)).unwrap().unwrap().flagged_count, 2);
}
