use std::sync::Arc;

use agora_core::{PostDraft, lacks_evidence};
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use chrono::Utc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{FeedItem, PostMessageRequest, PostMessageResponse, RoomQuery, merge_feed};
use crate::blocking::blocking_result;
use crate::handlers::require_user_id;

/// The room feed: posts and interventions merged by creation time.
///
/// Reading the feed doubles as the periodic poll — the inactivity rule
/// runs as a side effect here, so time-based nudges surface without a
/// background scheduler.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<Vec<FeedItem>>, ApiError> {
    let code = query.room.trim().to_uppercase();
    if code.is_empty() {
        return Err(ApiError::BadRequest("room is required".to_owned()));
    }

    let storage = Arc::clone(&state.storage);
    let engine = Arc::clone(&state.engine);
    let feed = blocking_result(move || {
        let Some(room) = storage.room_by_code(&code)? else {
            return Ok(None);
        };
        let now = Utc::now();
        let fired = engine.run_on_poll_at(&room, room.current_phase(now), now);
        if !fired.is_empty() {
            tracing::debug!(room = %room.code, ?fired, "poll fired rules");
        }
        let posts = storage.posts_in_room(room.id)?;
        let interventions = storage.interventions_in_room(room.id)?;
        Ok(Some(merge_feed(posts, interventions)))
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("Room not found".to_owned()))?;
    Ok(Json(feed))
}

/// Create a post and run the on-post rules.
///
/// Phase index and activity-run id are stamped from the room's state at
/// creation time; the evidence verdict comes from the shared classifier
/// and is stored on the post.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomQuery>,
    headers: HeaderMap,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<PostMessageResponse>, ApiError> {
    let user_id = require_user_id(&headers)?;
    let code = query.room.trim().to_uppercase();
    let content = req.content.trim().to_owned();
    if content.is_empty() {
        return Err(ApiError::BadRequest("content is required".to_owned()));
    }

    let storage = Arc::clone(&state.storage);
    let engine = Arc::clone(&state.engine);
    let response = blocking_result(move || {
        let Some(room) = storage.room_by_code(&code)? else {
            return Ok(None);
        };
        storage
            .user_by_id(user_id)?
            .ok_or_else(|| anyhow::anyhow!("unknown user {user_id}"))?;

        let now = Utc::now();
        let post = storage.append_post(&PostDraft {
            room_id: room.id,
            author_id: user_id,
            content: content.clone(),
            created_at: now,
            phase_index: room.current_phase(now),
            activity_run_id: room.activity_run_id.clone(),
            lacks_evidence: lacks_evidence(&content),
        })?;
        let fired = engine.run_on_post_at(&room, &post, now);
        Ok(Some(PostMessageResponse { post, fired }))
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("Room not found".to_owned()))?;
    Ok(Json(response))
}
