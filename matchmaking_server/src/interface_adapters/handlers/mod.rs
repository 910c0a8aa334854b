pub mod pool;
pub mod queue;

use crate::domain::PoolError;
use crate::interface_adapters::protocol::ErrorResponse;
use crate::use_cases::MatchmakerError;
use axum::{Json, http::StatusCode};
use tracing::{error, warn};

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
pub(crate) fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Map matchmaker errors to HTTP responses.
pub(crate) fn map_matchmaker_error(err: MatchmakerError) -> HandlerError {
    match err {
        MatchmakerError::Pool(PoolError::InvalidPlayer { reason }) => {
            error_response(StatusCode::BAD_REQUEST, reason)
        }
        MatchmakerError::Pool(PoolError::DuplicateId { player_id }) => {
            warn!(player_id = %player_id, "duplicate enqueue rejected");
            error_response(StatusCode::CONFLICT, "player is already queued")
        }
        MatchmakerError::Unavailable => {
            error!("matchmaker task is not running");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "matchmaker unavailable")
        }
    }
}
