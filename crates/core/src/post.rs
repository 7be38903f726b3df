//! Chat posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message posted by a room member. Immutable once created.
///
/// `phase_index` and `activity_run_id` are stamped from the room's resolved
/// state at creation time and never re-derived, so a post's phase
/// attribution is frozen even if the schedule is later recomputed.
/// `lacks_evidence` is the classifier's verdict on the content at the same
/// moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub room_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub phase_index: Option<u32>,
    pub activity_run_id: String,
    pub lacks_evidence: bool,
}

/// Fields for a post about to be appended; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub room_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub phase_index: Option<u32>,
    pub activity_run_id: String,
    pub lacks_evidence: bool,
}
