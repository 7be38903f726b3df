//! Request and response types for the HTTP API.

use agora_core::{AgentProfile, Intervention, Post, Room, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TempLoginRequest {
    pub display_name: String,
    pub role: UserRole,
}

/// `{"action": "create", "name": ...}` or `{"action": "join", "code": ...}`.
#[derive(Debug, Deserialize)]
pub struct RoomActionRequest {
    pub action: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct RoomSummary {
    pub code: String,
    pub name: String,
    pub activity_run_id: String,
    pub activity_started_at: Option<DateTime<Utc>>,
    pub phase_durations: Vec<u32>,
    /// The phase active at response time; historical records keep their
    /// own stamped values.
    pub current_phase: Option<u32>,
}

impl RoomSummary {
    #[must_use]
    pub fn from_room(room: &Room, now: DateTime<Utc>) -> Self {
        Self {
            code: room.code.clone(),
            name: room.name.clone(),
            activity_run_id: room.activity_run_id.clone(),
            activity_started_at: room.activity_started_at,
            phase_durations: room.phase_durations.clone(),
            current_phase: room.current_phase(now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    pub room: String,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostMessageResponse {
    pub post: Post,
    /// Rule names of the interventions this post triggered.
    pub fired: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityStartRequest {
    pub room: String,
    pub phase_durations: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct AgentListing {
    pub agents: Vec<AgentProfile>,
}

/// One entry in the merged room feed.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeedItem {
    Post(Post),
    Intervention(Intervention),
}

impl FeedItem {
    fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Post(p) => p.created_at,
            Self::Intervention(i) => i.created_at,
        }
    }
}

/// Merge posts and interventions into one sequence ordered by creation
/// time ascending. The engine is agnostic to this merge; it is purely a
/// display concern.
#[must_use]
pub fn merge_feed(posts: Vec<Post>, interventions: Vec<Intervention>) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = posts
        .into_iter()
        .map(FeedItem::Post)
        .chain(interventions.into_iter().map(FeedItem::Intervention))
        .collect();
    feed.sort_by_key(FeedItem::created_at);
    feed
}
