use serde::{Deserialize, Serialize};

// Request payload for enqueueing a player into matchmaking.
#[derive(Debug, Deserialize)]
pub struct QueueRequest {
    pub player_id: String,
    pub player_skill: u32,
    pub region: String,
}

// Response payload returned after attempting to enqueue a player.
#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub status: QueueStatus,
    pub ticket_id: Option<String>,
    pub match_id: Option<String>,
    pub opponent_id: Option<String>,
    pub region: String,
}

// Outcome status for queue responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    Matched,
}

// Response payload for polling a player's queue status.
#[derive(Debug, Serialize)]
pub struct QueueStatusResponse {
    pub status: QueueStatus,
    pub waited_ms: Option<u64>,
    pub match_id: Option<String>,
    pub opponent_id: Option<String>,
    pub region: Option<String>,
}

// Response payload for leaving the queue.
#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    pub withdrawn: bool,
}

// One waiting player as exposed by the pool listing.
#[derive(Debug, Serialize)]
pub struct WaitingPlayerView {
    pub player_id: String,
    pub player_skill: u32,
    pub region: String,
    pub waited_ms: u64,
}

// Response payload for the pool listing.
#[derive(Debug, Serialize)]
pub struct PoolResponse {
    pub size: usize,
    pub waiting: Vec<WaitingPlayerView>,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
