//! Rooms and memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::PhaseSchedule;

/// A discussion room.
///
/// `activity_run_id` is an opaque token regenerated on every activity
/// (re)start. Posts, interventions, and nudge state created under the old
/// token stay historically distinct from the new run even within the same
/// room and phase index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub activity_run_id: String,
    pub activity_started_at: Option<DateTime<Utc>>,
    /// Phase durations in seconds; empty until an activity is configured.
    pub phase_durations: Vec<u32>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// The room's phase schedule as currently configured.
    #[must_use]
    pub fn schedule(&self) -> PhaseSchedule {
        PhaseSchedule {
            started_at: self.activity_started_at,
            durations_secs: self.phase_durations.clone(),
        }
    }

    /// Resolve the phase active at `now`, if any.
    #[must_use]
    pub fn current_phase(&self, now: DateTime<Utc>) -> Option<u32> {
        self.schedule().current_phase(now)
    }
}

/// A room member with the join timestamp the inactivity grace period
/// is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    pub user_id: i64,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}
