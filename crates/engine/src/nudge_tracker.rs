//! Persistent wrapper around the nudge cadence state.

use agora_core::{NudgeState, NudgeStateStore};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Record one evidence-lacking post for `(room, user, phase)` and decide
/// whether a nudge is due.
///
/// The counter increment persists regardless of the outcome: on the silent
/// path only `flagged_count` changes, on the firing path the cooldown
/// timestamp moves too. State is created lazily on the first flag for the
/// triple.
pub fn record_and_should_nudge<S: NudgeStateStore + ?Sized>(
    store: &S,
    room_id: i64,
    user_id: i64,
    phase_index: Option<u32>,
    now: DateTime<Utc>,
) -> Result<bool> {
    let mut state = store
        .nudge_state(room_id, user_id, phase_index)?
        .unwrap_or_else(|| NudgeState::new(room_id, user_id, phase_index, now));
    let due = state.register_flag(now);
    store.save_nudge_state(&state)?;
    if due {
        tracing::debug!(room_id, user_id, ?phase_index, count = state.flagged_count, "nudge due");
    } else {
        tracing::debug!(
            room_id,
            user_id,
            ?phase_index,
            count = state.flagged_count,
            "flag counted silently"
        );
    }
    Ok(due)
}
