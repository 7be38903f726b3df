//! Equity rule: flag members whose share of the phase falls well below the
//! expected average.

use agora_core::{
    AgentRegistry, AgentRole, EQUITY_COOLDOWN_SECS, EQUITY_MIN_MEMBERS, EQUITY_MIN_POSTS,
    EQUITY_THRESHOLD_RATIO, EngineStore, InterventionDraft, Room, equity_rule_name,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

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

    let total_posts = store.count_posts_in_phase(room.id, phase_index)?;
    let members = store.members(room.id)?;
    // Too little signal to call anything unbalanced.
    if total_posts < EQUITY_MIN_POSTS || members.len() < EQUITY_MIN_MEMBERS {
        return Ok(Vec::new());
    }

    #[allow(clippy::cast_precision_loss, reason = "post/member counts are far below 2^52")]
    let expected_average = total_posts as f64 / members.len() as f64;
    let threshold = expected_average * EQUITY_THRESHOLD_RATIO;
    let cooldown_start = now - Duration::seconds(EQUITY_COOLDOWN_SECS);

    let mut fired = Vec::new();
    for member in &members {
        let result: Result<Option<String>> = (|| {
            let count = store.count_posts_by_author(room.id, phase_index, member.user_id)?;
            #[allow(clippy::cast_precision_loss, reason = "post counts are far below 2^52")]
            if (count as f64) >= threshold {
                return Ok(None);
            }
            let rule_name = equity_rule_name(member.user_id);
            if store.intervention_since(room.id, &rule_name, phase_index, cooldown_start)? {
                return Ok(None);
            }
            let run_id = store.activity_run_id(room.id)?;
            store.append_intervention(&InterventionDraft {
                agent_name: agent.name.clone(),
                room_id: room.id,
                rule_name: rule_name.clone(),
                message: format!(
                    "{}, you've shared {} message(s) so far—the group average suggests at \
                     least {:.1}. Jump in, your perspective matters!",
                    member.display_name, count, threshold
                ),
                explanation: format!(
                    "{} has {} post(s) in this phase against a balanced-participation \
                     threshold of {:.1}. The Facilitator is inviting them back in.",
                    member.display_name, count, threshold
                ),
                created_at: now,
                phase_index,
                activity_run_id: run_id,
            })?;
            tracing::info!(room_id = room.id, user_id = member.user_id, "equity nudge written");
            Ok(Some(rule_name))
        })();
        match result {
            Ok(Some(rule_name)) => fired.push(rule_name),
            Ok(None) => {},
            Err(e) => {
                tracing::warn!(
                    room_id = room.id,
                    user_id = member.user_id,
                    error = %e,
                    "equity check failed for member"
                );
            },
        }
    }
    Ok(fired)
}
