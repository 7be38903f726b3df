pub(crate) mod activity;
pub(crate) mod agents;
pub(crate) mod auth;
pub(crate) mod messages;
pub(crate) mod rooms;

use axum::http::HeaderMap;

use crate::api_error::ApiError;

/// Authentication stand-in: the caller's user id travels in `X-User-Id`.
pub(crate) fn require_user_id(headers: &HeaderMap) -> Result<i64, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("X-User-Id header is required".to_owned()))?;
    raw.parse::<i64>()
        .map_err(|_| ApiError::Unauthorized("X-User-Id must be a user id".to_owned()))
}
