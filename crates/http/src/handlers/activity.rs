use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{ActivityStartRequest, RoomSummary};
use crate::blocking::blocking_result;
use crate::handlers::require_user_id;

/// (Re)start a room's activity.
///
/// Regenerates the activity-run id, which scopes everything created under
/// the previous run as historical — posts, interventions, and nudge state
/// from before the restart no longer feed the rules.
pub async fn start_activity(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ActivityStartRequest>,
) -> Result<Json<RoomSummary>, ApiError> {
    require_user_id(&headers)?;
    let code = req.room.trim().to_uppercase();
    if code.is_empty() {
        return Err(ApiError::BadRequest("room is required".to_owned()));
    }
    if req.phase_durations.is_empty() {
        return Err(ApiError::BadRequest("phase_durations must not be empty".to_owned()));
    }
    if req.phase_durations.iter().any(|d| *d == 0) {
        return Err(ApiError::BadRequest("phase durations must be positive".to_owned()));
    }

    let storage = Arc::clone(&state.storage);
    let durations = req.phase_durations.clone();
    let room = blocking_result(move || {
        let Some(room) = storage.room_by_code(&code)? else {
            return Ok(None);
        };
        Ok(Some(storage.start_activity(room.id, &durations, Utc::now())?))
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("Room not found".to_owned()))?;
    Ok(Json(RoomSummary::from_room(&room, Utc::now())))
}
