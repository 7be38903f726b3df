//! Synthetic agent messages injected into the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An agent-authored message written by a rule. Immutable, append-only.
///
/// `rule_name` carries enough specificity for deduplication: per-user rules
/// embed the target user's id, so cooldown lookups are precise. A null
/// `phase_index` marks a phase-less intervention and is matched with an
/// explicit null check, never against a concrete phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: i64,
    pub agent_name: String,
    pub room_id: i64,
    pub rule_name: String,
    pub message: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
    pub phase_index: Option<u32>,
    pub activity_run_id: String,
}

/// Fields for an intervention about to be appended; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterventionDraft {
    pub agent_name: String,
    pub room_id: i64,
    pub rule_name: String,
    pub message: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
    pub phase_index: Option<u32>,
    pub activity_run_id: String,
}

/// Dedup key for the per-member inactivity nudge.
#[must_use]
pub fn inactivity_rule_name(user_id: i64) -> String {
    format!("individual_inactivity:user={user_id}")
}

/// Dedup key for the per-member equity nudge.
#[must_use]
pub fn equity_rule_name(user_id: i64) -> String {
    format!("unequal_participation:user={user_id}")
}

/// Dedup key for the per-member evidence nudge.
#[must_use]
pub fn evidence_rule_name(user_id: i64) -> String {
    format!("missing_evidence:user={user_id}")
}
