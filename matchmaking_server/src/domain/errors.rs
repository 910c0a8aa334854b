use crate::domain::player::PlayerId;
use thiserror::Error;

// Domain-level errors for pool mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("player {player_id} is already waiting")]
    DuplicateId { player_id: PlayerId },
    #[error("invalid player: {reason}")]
    InvalidPlayer { reason: &'static str },
}
