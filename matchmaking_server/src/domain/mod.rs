// Domain layer: players, pairing rules and the matchmaking pool.

pub mod errors;
pub mod player;
pub mod pool;
pub mod ports;
pub mod rules;

pub use errors::PoolError;
pub use player::{Player, PlayerId, Region, Timestamp, WaitingPlayer};
pub use pool::{Candidate, MatchPool, Pairing};
pub use rules::{MatchReason, MatchRules};
