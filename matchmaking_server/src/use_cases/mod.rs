// Use cases layer: the matchmaker driver around the domain pool.

pub mod matchmaker;

#[cfg(test)]
pub(crate) mod test_support;

pub use matchmaker::{
    EnqueueOutcome, MatchRecord, Matchmaker, MatchmakerError, MatchmakerHandle,
    MatchmakerSettings, PlayerStatus, PoolSnapshot, spawn_matchmaker,
};
