//! Store abstraction traits.
//!
//! The rule engine reads and writes through these traits rather than a
//! concrete backend, which keeps it testable and backend-agnostic. All
//! methods are synchronous; async callers wrap them in blocking tasks.
//!
//! The engine assumes at most single-statement isolation from the backend:
//! two near-simultaneous dispatches can both pass a dedup existence check
//! and double-write. That race is accepted and bounded — the cooldown
//! window self-heals it on the next interval.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::{
    Intervention, InterventionDraft, NudgeState, Post, PostDraft, Room, RoomMember, User, UserRole,
};

/// Rooms and memberships.
pub trait RoomStore: Send + Sync {
    /// Create a room with a fresh code and activity-run id.
    fn create_room(&self, code: &str, name: &str, now: DateTime<Utc>) -> Result<Room>;

    /// Look a room up by its join code.
    fn room_by_code(&self, code: &str) -> Result<Option<Room>>;

    /// Look a room up by id.
    fn room_by_id(&self, id: i64) -> Result<Option<Room>>;

    /// Add a member if not already present; idempotent per `(room, user)`.
    fn add_member(&self, room_id: i64, user_id: i64, now: DateTime<Utc>) -> Result<()>;

    /// Current members with their join timestamps.
    fn members(&self, room_id: i64) -> Result<Vec<RoomMember>>;

    /// (Re)start the room's activity: fresh run id, new start timestamp,
    /// replacement phase durations. Returns the updated room.
    fn start_activity(
        &self,
        room_id: i64,
        durations_secs: &[u32],
        now: DateTime<Utc>,
    ) -> Result<Room>;

    /// The room's current activity-run id.
    fn activity_run_id(&self, room_id: i64) -> Result<String>;
}

/// Append-only post log.
pub trait PostStore: Send + Sync {
    /// Append a post; the stamped fields in the draft are stored as-is.
    fn append_post(&self, draft: &PostDraft) -> Result<Post>;

    /// All posts in a room, ordered by creation time ascending.
    fn posts_in_room(&self, room_id: i64) -> Result<Vec<Post>>;

    /// Total posts in `(room, phase)`; a `None` phase matches only
    /// phase-less posts.
    fn count_posts_in_phase(&self, room_id: i64, phase_index: Option<u32>) -> Result<i64>;

    /// Posts by one author in `(room, phase)`.
    fn count_posts_by_author(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
    ) -> Result<i64>;

    /// Whether the author posted in `(room, phase)` at or after `since`.
    fn author_posted_since(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
        since: DateTime<Utc>,
    ) -> Result<bool>;
}

/// Append-only intervention log, also queried for deduplication.
pub trait InterventionStore: Send + Sync {
    /// Append an intervention record.
    fn append_intervention(&self, draft: &InterventionDraft) -> Result<Intervention>;

    /// Whether an intervention with this exact `rule_name` exists in
    /// `(room, phase)` at or after `since`. A `None` phase matches only
    /// phase-less records.
    fn intervention_since(
        &self,
        room_id: i64,
        rule_name: &str,
        phase_index: Option<u32>,
        since: DateTime<Utc>,
    ) -> Result<bool>;

    /// All interventions in a room, ordered by creation time ascending.
    fn interventions_in_room(&self, room_id: i64) -> Result<Vec<Intervention>>;
}

/// Nudge cadence state, keyed by `(room, user, phase)`.
pub trait NudgeStateStore: Send + Sync {
    /// Current state for the triple, if any.
    fn nudge_state(
        &self,
        room_id: i64,
        user_id: i64,
        phase_index: Option<u32>,
    ) -> Result<Option<NudgeState>>;

    /// Insert or update the state row for the triple.
    fn save_nudge_state(&self, state: &NudgeState) -> Result<()>;
}

/// Participant accounts.
pub trait UserStore: Send + Sync {
    /// Mint a throwaway account.
    fn create_user(
        &self,
        username: &str,
        display_name: &str,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<User>;

    /// Look a user up by id.
    fn user_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// Everything the rule engine needs from the backend, in one bound.
pub trait EngineStore: RoomStore + PostStore + InterventionStore + NudgeStateStore {}

impl<T> EngineStore for T where T: RoomStore + PostStore + InterventionStore + NudgeStateStore {}
