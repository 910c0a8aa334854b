use crate::domain::{Player, PlayerId};
use crate::interface_adapters::handlers::{HandlerError, error_response, map_matchmaker_error};
use crate::interface_adapters::protocol::{
    QueueRequest, QueueResponse, QueueStatus, QueueStatusResponse, WithdrawResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{EnqueueOutcome, PlayerStatus};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

// Enqueue a player for matchmaking and attempt to match immediately.
pub async fn enqueue(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueueRequest>,
) -> Result<Json<QueueResponse>, HandlerError> {
    let player = Player::new(request.player_id, request.player_skill, request.region)
        .map_err(|err| map_matchmaker_error(err.into()))?;
    let player_id = player.id.clone();

    let outcome = state
        .matchmaker
        .enqueue(player)
        .await
        .map_err(map_matchmaker_error)?;

    let response = match outcome {
        EnqueueOutcome::Waiting { ticket_id, region } => QueueResponse {
            status: QueueStatus::Waiting,
            ticket_id: Some(ticket_id),
            match_id: None,
            opponent_id: None,
            region: region.to_string(),
        },
        EnqueueOutcome::Matched(record) => {
            let opponent_id = record
                .pairing
                .opponent_of(&player_id)
                .map(|opponent| opponent.id().to_string());
            let region = record.pairing.first.region().to_string();
            QueueResponse {
                status: QueueStatus::Matched,
                ticket_id: None,
                match_id: Some(record.match_id),
                opponent_id,
                region,
            }
        }
    };

    Ok(Json(response))
}

// Report whether a player is still waiting or has been matched.
pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<QueueStatusResponse>, HandlerError> {
    let player_id = PlayerId::new(player_id);
    let status = state
        .matchmaker
        .status(player_id.clone())
        .await
        .map_err(map_matchmaker_error)?;

    match status {
        PlayerStatus::Waiting { waited, .. } => Ok(Json(QueueStatusResponse {
            status: QueueStatus::Waiting,
            waited_ms: Some(waited.as_millis() as u64),
            match_id: None,
            opponent_id: None,
            region: None,
        })),
        PlayerStatus::Matched(record) => {
            let opponent_id = record
                .pairing
                .opponent_of(&player_id)
                .map(|opponent| opponent.id().to_string());
            Ok(Json(QueueStatusResponse {
                status: QueueStatus::Matched,
                waited_ms: None,
                region: Some(record.pairing.first.region().to_string()),
                match_id: Some(record.match_id),
                opponent_id,
            }))
        }
        PlayerStatus::Unknown => Err(error_response(
            StatusCode::NOT_FOUND,
            "player is not queued",
        )),
    }
}

// Remove a player from the queue. Unknown or already matched ids are not an error.
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<WithdrawResponse>, HandlerError> {
    let withdrawn = state
        .matchmaker
        .withdraw(PlayerId::new(player_id))
        .await
        .map_err(map_matchmaker_error)?;

    Ok(Json(WithdrawResponse { withdrawn }))
}
