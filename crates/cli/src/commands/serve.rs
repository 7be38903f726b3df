use std::sync::Arc;

use agora_core::AgentRegistry;
use agora_http::{AppState, create_router};
use agora_storage::Storage;
use anyhow::Result;

use crate::{ensure_db_dir, get_db_path};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Arc::new(Storage::new(&db_path)?);

    let agents = AgentRegistry::from_env();
    for profile in agents.profiles() {
        tracing::info!(role = %profile.role, active = profile.is_active, "agent configured");
    }

    let state = Arc::new(AppState::new(storage, agents));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
