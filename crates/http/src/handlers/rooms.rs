use std::sync::Arc;

use agora_core::ROOM_CODE_LEN;
use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;
use rand::Rng as _;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{RoomActionRequest, RoomSummary};
use crate::blocking::blocking_result;
use crate::handlers::require_user_id;

/// Room codes look like "K3QZ7M": uppercase letters and digits.
fn generate_code() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Create or join a room; either way the caller becomes a member.
pub async fn rooms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RoomActionRequest>,
) -> Result<Json<RoomSummary>, ApiError> {
    let user_id = require_user_id(&headers)?;
    let storage = Arc::clone(&state.storage);

    match req.action.trim() {
        "create" => {
            let name = req.name.trim().to_owned();
            let room = blocking_result(move || {
                let now = Utc::now();
                let user = storage
                    .user_by_id(user_id)?
                    .ok_or_else(|| anyhow::anyhow!("unknown user {user_id}"))?;
                // Codes can collide; retry a few times before giving up.
                let mut last_err = None;
                for _ in 0..5 {
                    match storage.create_room(&generate_code(), &name, now) {
                        Ok(room) => {
                            storage.add_member(room.id, user.id, now)?;
                            return Ok(room);
                        },
                        Err(e) if e.is_duplicate() => last_err = Some(e),
                        Err(e) => return Err(e.into()),
                    }
                }
                Err(anyhow::anyhow!("could not allocate a room code: {:?}", last_err))
            })
            .await?;
            Ok(Json(RoomSummary::from_room(&room, Utc::now())))
        },
        "join" => {
            let code = req.code.trim().to_uppercase();
            if code.is_empty() {
                return Err(ApiError::BadRequest("code is required".to_owned()));
            }
            let room = blocking_result(move || {
                let now = Utc::now();
                storage
                    .user_by_id(user_id)?
                    .ok_or_else(|| anyhow::anyhow!("unknown user {user_id}"))?;
                let Some(room) = storage.room_by_code(&code)? else {
                    return Ok(None);
                };
                storage.add_member(room.id, user_id, now)?;
                Ok(Some(room))
            })
            .await?
            .ok_or_else(|| ApiError::NotFound("Room not found".to_owned()))?;
            Ok(Json(RoomSummary::from_room(&room, Utc::now())))
        },
        _ => Err(ApiError::BadRequest("Invalid action".to_owned())),
    }
}
