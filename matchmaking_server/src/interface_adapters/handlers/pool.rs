use crate::interface_adapters::handlers::{HandlerError, map_matchmaker_error};
use crate::interface_adapters::protocol::{PoolResponse, WaitingPlayerView};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State};
use std::sync::Arc;

// List everyone currently waiting, in admission order.
pub async fn list_pool(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PoolResponse>, HandlerError> {
    let snapshot = state
        .matchmaker
        .snapshot()
        .await
        .map_err(map_matchmaker_error)?;

    let waiting: Vec<WaitingPlayerView> = snapshot
        .waiting
        .iter()
        .map(|player| WaitingPlayerView {
            player_id: player.id().to_string(),
            player_skill: player.skill_level(),
            region: player.region().to_string(),
            waited_ms: player.waited(snapshot.now).as_millis() as u64,
        })
        .collect();

    Ok(Json(PoolResponse {
        size: waiting.len(),
        waiting,
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
