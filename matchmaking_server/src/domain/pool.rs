// In-memory matchmaking pool and its pairing scan.

use crate::domain::errors::PoolError;
use crate::domain::player::{Player, PlayerId, Timestamp, WaitingPlayer};
use crate::domain::rules::{MatchReason, MatchRules};

/// Indices of the first acceptable pair found by [`MatchPool::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub first: usize,
    pub second: usize,
    pub reason: MatchReason,
}

/// Two players removed from the pool together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// The earlier of the two in pool order.
    pub first: WaitingPlayer,
    pub second: WaitingPlayer,
    pub reason: MatchReason,
}

impl Pairing {
    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.first.id() == player_id || self.second.id() == player_id
    }

    // The other half of the pairing, if `player_id` is part of it.
    pub fn opponent_of(&self, player_id: &PlayerId) -> Option<&WaitingPlayer> {
        if self.first.id() == player_id {
            Some(&self.second)
        } else if self.second.id() == player_id {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Players waiting for a match, in admission order.
///
/// Every mutation goes through `admit`, `withdraw` or `find_match`; the pool
/// never contains the same id twice and never holds a matched player.
#[derive(Debug, Default)]
pub struct MatchPool {
    rules: MatchRules,
    waiting: Vec<WaitingPlayer>,
}

impl MatchPool {
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            waiting: Vec::new(),
        }
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn waiting(&self) -> &[WaitingPlayer] {
        &self.waiting
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.position(player_id).is_some()
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&WaitingPlayer> {
        self.waiting.iter().find(|player| player.id() == player_id)
    }

    // Stamp the player with `now` and append it behind everyone already waiting.
    pub fn admit(&mut self, player: Player, now: Timestamp) -> Result<(), PoolError> {
        if self.contains(&player.id) {
            return Err(PoolError::DuplicateId {
                player_id: player.id,
            });
        }

        self.waiting.push(WaitingPlayer::admitted(player, now));
        Ok(())
    }

    // Remove a waiting player. Unknown or already matched ids are a no-op.
    pub fn withdraw(&mut self, player_id: &PlayerId) -> Option<WaitingPlayer> {
        let index = self.position(player_id)?;
        // Vec::remove keeps the remaining players in admission order.
        Some(self.waiting.remove(index))
    }

    /// Find the first acceptable pair without touching the pool.
    ///
    /// Pairs are visited with `first` ascending, then `second` ascending, so
    /// the earliest arrivals are preferred. The result depends only on the
    /// pool contents and `now`.
    pub fn scan(&self, now: Timestamp) -> Option<Candidate> {
        for (first, a) in self.waiting.iter().enumerate() {
            for (offset, b) in self.waiting[first + 1..].iter().enumerate() {
                if let Some(reason) = self.rules.evaluate(a, b, now) {
                    return Some(Candidate {
                        first,
                        second: first + 1 + offset,
                        reason,
                    });
                }
            }
        }
        None
    }

    /// Find the first acceptable pair and remove both players in one step.
    pub fn find_match(&mut self, now: Timestamp) -> Option<Pairing> {
        let candidate = self.scan(now)?;

        // Remove the later index first so the earlier one stays valid.
        let second = self.waiting.remove(candidate.second);
        let first = self.waiting.remove(candidate.first);

        Some(Pairing {
            first,
            second,
            reason: candidate.reason,
        })
    }

    fn position(&self, player_id: &PlayerId) -> Option<usize> {
        self.waiting.iter().position(|player| player.id() == player_id)
    }
}
