//! Evidence rule: ask for support behind unsupported claims.
//!
//! Runs only when a new post exists, never on polls. The nudge-state
//! counter advances before the agent check, so a deactivated Socratic
//! agent still accumulates cadence state while suppressed.

use agora_core::{
    AgentRegistry, AgentRole, EngineStore, InterventionDraft, Post, Room, evidence_rule_name,
    lacks_evidence,
};
use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::nudge_tracker::record_and_should_nudge;

pub(crate) fn evaluate<S: EngineStore + ?Sized>(
    store: &S,
    agents: &AgentRegistry,
    room: &Room,
    post: &Post,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    if !lacks_evidence(&post.content) {
        return Ok(Vec::new());
    }

    let due = record_and_should_nudge(store, room.id, post.author_id, post.phase_index, now)?;
    if !due {
        return Ok(Vec::new());
    }

    let Some(agent) = agents.active(AgentRole::Socratic) else {
        tracing::debug!(room_id = room.id, "socratic agent missing or inactive");
        return Ok(Vec::new());
    };

    let rule_name = evidence_rule_name(post.author_id);
    let run_id = store.activity_run_id(room.id)?;
    store.append_intervention(&InterventionDraft {
        agent_name: agent.name.clone(),
        room_id: room.id,
        rule_name: rule_name.clone(),
        message: format!(
            "Interesting point, {}! Can you share what evidence or reasoning supports that idea?",
            post.author_name
        ),
        explanation: "This message appears to make a claim without supporting evidence. \
                      The Socratic Agent is asking for clarification."
            .to_owned(),
        created_at: now,
        phase_index: post.phase_index,
        activity_run_id: run_id,
    })?;
    tracing::info!(room_id = room.id, user_id = post.author_id, "evidence nudge written");
    Ok(vec![rule_name])
}
