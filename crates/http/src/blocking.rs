//! Helper for running blocking storage/engine work in async handlers.

use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure and maps both join and domain errors into
/// [`ApiError`].
///
/// # Example
/// ```ignore
/// let storage = Arc::clone(&state.storage);
/// let room = blocking_result(move || storage.room_by_code(&code)).await?;
/// ```
pub async fn blocking_result<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
        .map_err(ApiError::from)
}
