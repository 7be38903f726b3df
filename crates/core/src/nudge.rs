//! Per-user nudge cadence state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{NUDGE_CADENCE, NUDGE_FLOOR_SECS};

/// Counter and cooldown timestamp controlling evidence-nudge frequency for
/// one `(room, user, phase)` triple.
///
/// Created lazily on the first evidence-lacking post for the triple and
/// never deleted; the phase index in the key naturally partitions state
/// across phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NudgeState {
    pub room_id: i64,
    pub user_id: i64,
    pub phase_index: Option<u32>,
    /// Total evidence-lacking posts seen, including ones that nudged.
    pub flagged_count: u32,
    pub last_nudged_at: Option<DateTime<Utc>>,
}

impl NudgeState {
    /// Fresh state for a triple seen for the first time at `now`.
    ///
    /// The timestamp starts at `now` so the time-based floor measures from
    /// the first flag, not from epoch: a brand-new triple does not nudge
    /// until the cadence or the floor says so.
    #[must_use]
    pub fn new(room_id: i64, user_id: i64, phase_index: Option<u32>, now: DateTime<Utc>) -> Self {
        Self { room_id, user_id, phase_index, flagged_count: 0, last_nudged_at: Some(now) }
    }

    /// Record one more evidence-lacking post and decide whether a nudge is
    /// due.
    ///
    /// The counter always advances. A nudge is due when the count hits the
    /// cadence, or when the last nudge is unset or older than the floor.
    /// On the firing path `last_nudged_at` moves to `now`; on the silent
    /// path only the counter changes — callers must persist the increment
    /// either way.
    pub fn register_flag(&mut self, now: DateTime<Utc>) -> bool {
        self.flagged_count = self.flagged_count.saturating_add(1);
        let floor_elapsed = self
            .last_nudged_at
            .is_none_or(|last| now - last > Duration::seconds(NUDGE_FLOOR_SECS));
        let due = self.flagged_count % NUDGE_CADENCE == 0 || floor_elapsed;
        if due {
            self.last_nudged_at = Some(now);
        }
        due
    }
}
