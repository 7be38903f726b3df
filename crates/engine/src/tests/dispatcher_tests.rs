#![expect(clippy::unwrap_used, reason = "test code")]

use chrono::{Duration, Utc};

use super::{CLAIM, append_post, create_test_storage, engine, room_with_members};

#[test]
fn run_on_post_aggregates_equity_then_evidence() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "DISP1", &["talker", "lurker"], joined);
    let rules = engine(&storage);

    // Two claims by the talker, silently counted.
    for offset in [0i64, 5] {
        let at = now + Duration::seconds(offset);
        let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
        assert!(rules.run_on_post_at(&room, &post, at).is_empty());
    }

    // Third claim: now three posts exist in the phase, so equity flags the
    // lurker, and the cadence fires the evidence nudge at the talker.
    let at = now + Duration::seconds(10);
    let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
    let fired = rules.run_on_post_at(&room, &post, at);
    assert_eq!(
        fired,
        vec![
            format!("unequal_participation:user={}", users[1].id),
            format!("missing_evidence:user={}", users[0].id),
        ]
    );

    let interventions = storage.interventions_in_room(room.id).unwrap();
    assert_eq!(interventions.len(), 2);
}

#[test]
fn rules_stay_independent_when_one_cannot_fire() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "DISP2", &["only"], joined);
    let rules = engine(&storage);

    // Single member: equity never has enough signal, evidence still runs.
    for offset in [0i64, 5, 10] {
        let at = now + Duration::seconds(offset);
        let post = append_post(&storage, &room, &users[0], CLAIM, Some(0), at);
        let fired = rules.run_on_post_at(&room, &post, at);
        if offset == 10 {
            assert_eq!(fired, vec![format!("missing_evidence:user={}", users[0].id)]);
        } else {
            assert!(fired.is_empty());
        }
    }
}

#[test]
fn poll_runs_only_the_inactivity_rule() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, users) = room_with_members(&storage, "DISP3", &["talker", "lurker"], joined);
    let rules = engine(&storage);

    // Conditions under which equity would fire if polled.
    for _ in 0..3 {
        append_post(&storage, &room, &users[0], "item 1 of the plan", Some(0), now - Duration::seconds(30));
    }

    let fired = rules.run_on_poll_at(&room, Some(0), now);
    // Only the lurker's inactivity nudge; the talker posted recently.
    assert_eq!(fired, vec![format!("individual_inactivity:user={}", users[1].id)]);
    let interventions = storage.interventions_in_room(room.id).unwrap();
    assert_eq!(interventions.len(), 1);
    assert!(interventions[0].rule_name.starts_with("individual_inactivity:"));
}

#[test]
fn interventions_stamp_the_live_run_id_after_a_restart() {
    let (storage, _temp_dir) = create_test_storage();
    let now = Utc::now();
    let joined = now - Duration::seconds(600);
    let (room, _) = room_with_members(&storage, "DISP4", &["quiet"], joined);
    let rules = engine(&storage);

    let old_run = room.activity_run_id.clone();
    let restarted = storage.start_activity(room.id, &[300], now).unwrap();
    assert_ne!(restarted.activity_run_id, old_run);

    let fired = rules.run_on_poll_at(&restarted, Some(0), now);
    assert_eq!(fired.len(), 1);
    let interventions = storage.interventions_in_room(room.id).unwrap();
    assert_eq!(interventions[0].activity_run_id, restarted.activity_run_id);
}
