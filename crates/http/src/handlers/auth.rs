use std::sync::Arc;

use agora_core::User;
use axum::{Json, extract::State};
use chrono::Utc;
use rand::Rng as _;
use rand::distributions::Alphanumeric;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::TempLoginRequest;
use crate::blocking::blocking_result;

/// Mint a throwaway account for a display name. No passwords, no
/// sessions: the returned id is the caller's credential.
pub async fn temp_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TempLoginRequest>,
) -> Result<Json<User>, ApiError> {
    let display_name = req.display_name.trim().to_owned();
    if display_name.is_empty() {
        return Err(ApiError::BadRequest("display_name is required".to_owned()));
    }

    let suffix: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(6).map(char::from).collect();
    let username = format!("{}-{}", slugify(&display_name), suffix.to_lowercase());

    let storage = Arc::clone(&state.storage);
    let user = blocking_result(move || {
        Ok(storage.create_user(&username, &display_name, req.role, Utc::now())?)
    })
    .await?;
    Ok(Json(user))
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() { "user".to_owned() } else { slug }
}
