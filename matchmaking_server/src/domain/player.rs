use crate::domain::errors::PoolError;
use std::fmt;
use std::ops::Add;
use std::time::Duration;

// Opaque player identifier, stable for as long as the player waits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Discrete region tag. Only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Milliseconds since the Unix epoch.
///
/// Wait times are always derived from two timestamps, never accumulated, so a
/// retried scan cannot double-count time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_epoch_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_epoch_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, zero if the clock went backwards.
    pub fn elapsed_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}

// A player asking to be matched, before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub skill_level: u32,
    pub region: Region,
}

impl Player {
    // Build a player record, rejecting blank identifiers and regions.
    pub fn new(
        id: impl Into<String>,
        skill_level: u32,
        region: impl Into<String>,
    ) -> Result<Self, PoolError> {
        let id = id.into();
        let region = region.into();

        if id.trim().is_empty() {
            return Err(PoolError::InvalidPlayer {
                reason: "player_id is required",
            });
        }
        if region.trim().is_empty() {
            return Err(PoolError::InvalidPlayer {
                reason: "region is required",
            });
        }

        Ok(Self {
            id: PlayerId::new(id),
            skill_level,
            region: Region::new(region),
        })
    }
}

/// A player admitted into a pool.
///
/// Only [`MatchPool::admit`](crate::domain::pool::MatchPool::admit) creates
/// these, so every waiting player carries the instant it joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingPlayer {
    player: Player,
    joined_at: Timestamp,
}

impl WaitingPlayer {
    pub(crate) fn admitted(player: Player, joined_at: Timestamp) -> Self {
        Self { player, joined_at }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }

    pub fn skill_level(&self) -> u32 {
        self.player.skill_level
    }

    pub fn region(&self) -> &Region {
        &self.player.region
    }

    pub fn joined_at(&self) -> Timestamp {
        self.joined_at
    }

    pub fn waited(&self, now: Timestamp) -> Duration {
        now.elapsed_since(self.joined_at)
    }

    pub fn into_player(self) -> Player {
        self.player
    }
}
