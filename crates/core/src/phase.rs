//! Phase resolution for timed activities.
//!
//! A room's activity is a list of phase durations anchored at a start
//! timestamp. The resolver answers "what phase is it right now" only;
//! records stamped with a phase at creation keep that value forever, even
//! if the schedule is later edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A start timestamp plus an ordered list of phase durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    /// When the activity (re)started; `None` before the first start.
    pub started_at: Option<DateTime<Utc>>,
    /// Duration of each phase in seconds, index 0 first.
    pub durations_secs: Vec<u32>,
}

impl PhaseSchedule {
    /// Resolve the phase index containing `now`, or `None` when the
    /// activity has not started, has finished, or has no phases.
    #[must_use]
    pub fn current_phase(&self, now: DateTime<Utc>) -> Option<u32> {
        let started = self.started_at?;
        if now < started {
            return None;
        }
        let mut elapsed = (now - started).num_seconds();
        for (index, secs) in self.durations_secs.iter().enumerate() {
            if elapsed < i64::from(*secs) {
                return u32::try_from(index).ok();
            }
            elapsed -= i64::from(*secs);
        }
        None
    }

    /// Total scheduled length in seconds.
    #[must_use]
    pub fn total_secs(&self) -> u64 {
        self.durations_secs.iter().map(|s| u64::from(*s)).sum()
    }
}
