use crate::domain::player::{Timestamp, WaitingPlayer};
use std::time::Duration;

pub const DEFAULT_SKILL_TOLERANCE: u32 = 10;
pub const DEFAULT_LONG_WAIT_THRESHOLD: Duration = Duration::from_secs(30);

/// Why a pair of waiting players was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// Skill within tolerance and same region.
    SkillAndRegion,
    /// Waited past the long-wait threshold.
    LongWait,
}

impl MatchReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchReason::SkillAndRegion => "skill_and_region",
            MatchReason::LongWait => "long_wait",
        }
    }
}

/// Pairing rules for a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    /// Largest accepted absolute skill difference.
    pub skill_tolerance: u32,
    /// Wait after which a player becomes eligible for priority matching.
    pub long_wait_threshold: Duration,
    /// When true both players must have waited long; otherwise one is enough.
    pub both_must_wait_long: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            skill_tolerance: DEFAULT_SKILL_TOLERANCE,
            long_wait_threshold: DEFAULT_LONG_WAIT_THRESHOLD,
            both_must_wait_long: true,
        }
    }
}

impl MatchRules {
    pub fn has_waited_long(&self, player: &WaitingPlayer, now: Timestamp) -> bool {
        player.waited(now) >= self.long_wait_threshold
    }

    // Decide whether two players may be paired at `now`, and on what grounds.
    pub fn evaluate(
        &self,
        a: &WaitingPlayer,
        b: &WaitingPlayer,
        now: Timestamp,
    ) -> Option<MatchReason> {
        let skill_diff = a.skill_level().abs_diff(b.skill_level());
        if skill_diff <= self.skill_tolerance && a.region() == b.region() {
            return Some(MatchReason::SkillAndRegion);
        }

        let long_a = self.has_waited_long(a, now);
        let long_b = self.has_waited_long(b, now);
        let long_wait = if self.both_must_wait_long {
            long_a && long_b
        } else {
            long_a || long_b
        };

        long_wait.then_some(MatchReason::LongWait)
    }
}
