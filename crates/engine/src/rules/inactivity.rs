//! Individual-inactivity rule: prompt members who have gone quiet.

use agora_core::{
    AgentProfile, AgentRegistry, AgentRole, EngineStore, INACTIVITY_WINDOW_SECS,
    InterventionDraft, Room, RoomMember, inactivity_rule_name,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

/// Check every current member for silence in `(room, phase)`.
///
/// Members are independent units: one member's store failure is logged and
/// skipped, and interventions already written for other members stand.
pub(crate) fn evaluate<S: EngineStore + ?Sized>(
    store: &S,
    agents: &AgentRegistry,
    room: &Room,
    phase_index: Option<u32>,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let Some(agent) = agents.active(AgentRole::Facilitator) else {
        tracing::debug!(room_id = room.id, "facilitator agent missing or inactive");
        return Ok(Vec::new());
    };

    let members = store.members(room.id)?;
    let mut fired = Vec::new();
    for member in &members {
        match nudge_member(store, agent, room, member, phase_index, now) {
            Ok(Some(rule_name)) => fired.push(rule_name),
            Ok(None) => {},
            Err(e) => {
                tracing::warn!(
                    room_id = room.id,
                    user_id = member.user_id,
                    error = %e,
                    "inactivity check failed for member"
                );
            },
        }
    }
    Ok(fired)
}

/// Decide for one member; idempotent within the cooldown window.
fn nudge_member<S: EngineStore + ?Sized>(
    store: &S,
    agent: &AgentProfile,
    room: &Room,
    member: &RoomMember,
    phase_index: Option<u32>,
    now: DateTime<Utc>,
) -> Result<Option<String>> {
    let window_start = now - Duration::seconds(INACTIVITY_WINDOW_SECS);

    if store.author_posted_since(room.id, phase_index, member.user_id, window_start)? {
        return Ok(None);
    }
    // Grace period: the newly joined haven't had a fair chance to speak.
    if member.joined_at > window_start {
        return Ok(None);
    }
    let rule_name = inactivity_rule_name(member.user_id);
    if store.intervention_since(room.id, &rule_name, phase_index, window_start)? {
        return Ok(None);
    }

    let run_id = store.activity_run_id(room.id)?;
    store.append_intervention(&InterventionDraft {
        agent_name: agent.name.clone(),
        room_id: room.id,
        rule_name: rule_name.clone(),
        message: format!(
            "It's been quiet, {}—we'd love to hear what you think!",
            member.display_name
        ),
        explanation: format!(
            "{} hasn't posted in the last 2 minutes. The Facilitator is encouraging participation.",
            member.display_name
        ),
        created_at: now,
        phase_index,
        activity_run_id: run_id,
    })?;
    tracing::info!(room_id = room.id, user_id = member.user_id, "inactivity nudge written");
    Ok(Some(rule_name))
}
