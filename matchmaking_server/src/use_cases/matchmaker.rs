// Matchmaker driver: owns one pool and serializes every operation on it.

use crate::domain::{
    MatchPool, MatchRules, Pairing, Player, PlayerId, PoolError, Region, Timestamp, WaitingPlayer,
    ports::Clock,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Notify, broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

/// Runtime settings for a matchmaker task.
#[derive(Debug, Clone)]
pub struct MatchmakerSettings {
    /// Pairing rules applied by the pool.
    pub rules: MatchRules,
    /// Delay between scans while nobody new arrives.
    pub retry_interval: Duration,
    /// Capacity for inbound commands.
    pub command_channel_capacity: usize,
    /// Capacity for broadcast match records.
    pub match_broadcast_capacity: usize,
    /// How many players' latest matches are remembered for status polling.
    pub recent_match_capacity: usize,
}

impl Default for MatchmakerSettings {
    fn default() -> Self {
        Self {
            rules: MatchRules::default(),
            retry_interval: Duration::from_secs(1),
            command_channel_capacity: 1024,
            match_broadcast_capacity: 128,
            recent_match_capacity: 1024,
        }
    }
}

// A pairing emitted by the matchmaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub match_id: String,
    pub pairing: Pairing,
    pub matched_at: Timestamp,
}

// Outcome returned after enqueueing a player into matchmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Waiting { ticket_id: String, region: Region },
    Matched(MatchRecord),
}

// Where a player currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    Waiting { joined_at: Timestamp, waited: Duration },
    Matched(MatchRecord),
    Unknown,
}

// Copy of the pool contents at a single instant.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub now: Timestamp,
    pub waiting: Vec<WaitingPlayer>,
}

// Errors surfaced to callers of the matchmaker handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchmakerError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("matchmaker is not running")]
    Unavailable,
}

enum Command {
    Enqueue {
        player: Player,
        reply: oneshot::Sender<Result<EnqueueOutcome, PoolError>>,
    },
    Withdraw {
        player_id: PlayerId,
        reply: oneshot::Sender<bool>,
    },
    Status {
        player_id: PlayerId,
        reply: oneshot::Sender<PlayerStatus>,
    },
    Snapshot {
        reply: oneshot::Sender<PoolSnapshot>,
    },
}

/// In-memory matchmaker wrapping a [`MatchPool`].
///
/// Stamps admissions with its clock, drains every available pairing after each
/// admission or retry, and remembers the latest match per player so callers
/// that were waiting can find out who they were paired with.
pub struct Matchmaker<C> {
    pool: MatchPool,
    clock: C,
    match_tx: broadcast::Sender<MatchRecord>,
    recent: HashMap<PlayerId, MatchRecord>,
    // Insertion order for eviction, tagged with the match id it was stored for.
    recent_order: VecDeque<(PlayerId, String)>,
    recent_capacity: usize,
}

impl<C> Matchmaker<C>
where
    C: Clock,
{
    pub fn new(
        rules: MatchRules,
        clock: C,
        match_tx: broadcast::Sender<MatchRecord>,
        recent_capacity: usize,
    ) -> Self {
        Self {
            pool: MatchPool::new(rules),
            clock,
            match_tx,
            recent: HashMap::new(),
            recent_order: VecDeque::new(),
            recent_capacity,
        }
    }

    pub fn pool(&self) -> &MatchPool {
        &self.pool
    }

    // Admit a player and attempt to match immediately.
    pub fn enqueue(&mut self, player: Player) -> Result<EnqueueOutcome, PoolError> {
        let now = self.clock.now();
        let player_id = player.id.clone();
        let region = player.region.clone();

        self.pool.admit(player, now)?;
        // A fresh admission supersedes whatever this id was matched into before.
        self.recent.remove(&player_id);
        info!(
            player_id = %player_id,
            region = %region,
            waiting = self.pool.len(),
            "player admitted"
        );

        let matched = self
            .drain_matches(now)
            .into_iter()
            .find(|record| record.pairing.contains(&player_id));

        Ok(match matched {
            Some(record) => EnqueueOutcome::Matched(record),
            None => EnqueueOutcome::Waiting {
                ticket_id: build_ticket_id(&player_id, now),
                region,
            },
        })
    }

    // Remove a waiting player. Returns false if it was not waiting.
    pub fn withdraw(&mut self, player_id: &PlayerId) -> bool {
        match self.pool.withdraw(player_id) {
            Some(player) => {
                info!(
                    player_id = %player_id,
                    waited_ms = player.waited(self.clock.now()).as_millis() as u64,
                    "player withdrawn"
                );
                true
            }
            None => false,
        }
    }

    pub fn status(&self, player_id: &PlayerId) -> PlayerStatus {
        if let Some(player) = self.pool.get(player_id) {
            return PlayerStatus::Waiting {
                joined_at: player.joined_at(),
                waited: player.waited(self.clock.now()),
            };
        }

        match self.recent.get(player_id) {
            Some(record) => PlayerStatus::Matched(record.clone()),
            None => PlayerStatus::Unknown,
        }
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            now: self.clock.now(),
            waiting: self.pool.waiting().to_vec(),
        }
    }

    // Re-run the scan with the current time. Returns how many matches were made.
    pub fn retry(&mut self) -> usize {
        let now = self.clock.now();
        self.drain_matches(now).len()
    }

    // Pull pairings out of the pool until none qualifies at `now`.
    fn drain_matches(&mut self, now: Timestamp) -> Vec<MatchRecord> {
        let mut records = Vec::new();

        while let Some(pairing) = self.pool.find_match(now) {
            let record = MatchRecord {
                match_id: build_match_id(),
                pairing,
                matched_at: now,
            };
            info!(
                match_id = %record.match_id,
                first = %record.pairing.first.id(),
                second = %record.pairing.second.id(),
                reason = record.pairing.reason.as_str(),
                "match found"
            );

            self.remember(&record);
            // No subscribers is fine; status polling still sees the match.
            let _ = self.match_tx.send(record.clone());
            records.push(record);
        }

        records
    }

    fn remember(&mut self, record: &MatchRecord) {
        if self.recent_capacity == 0 {
            return;
        }

        for player_id in [record.pairing.first.id(), record.pairing.second.id()] {
            self.recent.insert(player_id.clone(), record.clone());
            self.recent_order
                .push_back((player_id.clone(), record.match_id.clone()));
        }

        while self.recent_order.len() > self.recent_capacity {
            let Some((player_id, match_id)) = self.recent_order.pop_front() else {
                break;
            };
            // Skip entries that were overwritten by a newer match.
            if self
                .recent
                .get(&player_id)
                .is_some_and(|record| record.match_id == match_id)
            {
                self.recent.remove(&player_id);
            }
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Enqueue { player, reply } => {
                let _ = reply.send(self.enqueue(player));
            }
            Command::Withdraw { player_id, reply } => {
                let _ = reply.send(self.withdraw(&player_id));
            }
            Command::Status { player_id, reply } => {
                let _ = reply.send(self.status(&player_id));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }
}

/// Cloneable handle for talking to a running matchmaker task.
#[derive(Clone)]
pub struct MatchmakerHandle {
    command_tx: mpsc::Sender<Command>,
    match_tx: broadcast::Sender<MatchRecord>,
    shutdown: Arc<Notify>,
}

impl MatchmakerHandle {
    pub async fn enqueue(&self, player: Player) -> Result<EnqueueOutcome, MatchmakerError> {
        let outcome = self
            .request(|reply| Command::Enqueue { player, reply })
            .await?;
        Ok(outcome?)
    }

    pub async fn withdraw(&self, player_id: PlayerId) -> Result<bool, MatchmakerError> {
        self.request(|reply| Command::Withdraw { player_id, reply })
            .await
    }

    pub async fn status(&self, player_id: PlayerId) -> Result<PlayerStatus, MatchmakerError> {
        self.request(|reply| Command::Status { player_id, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<PoolSnapshot, MatchmakerError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    // Receive every match emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchRecord> {
        self.match_tx.subscribe()
    }

    // Stop the task; pending and later requests fail with `Unavailable`.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, MatchmakerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| MatchmakerError::Unavailable)?;
        reply_rx.await.map_err(|_| MatchmakerError::Unavailable)
    }
}

// Spawn a matchmaker task on the current runtime and return its handle.
pub fn spawn_matchmaker<C>(settings: MatchmakerSettings, clock: C) -> MatchmakerHandle
where
    C: Clock + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<Command>(settings.command_channel_capacity);
    let (match_tx, _match_rx) =
        broadcast::channel::<MatchRecord>(settings.match_broadcast_capacity);
    let shutdown = Arc::new(Notify::new());

    let matchmaker = Matchmaker::new(
        settings.rules,
        clock,
        match_tx.clone(),
        settings.recent_match_capacity,
    );

    tokio::spawn(matchmaker_task(
        matchmaker,
        command_rx,
        settings.retry_interval,
        shutdown.clone(),
    ));

    MatchmakerHandle {
        command_tx,
        match_tx,
        shutdown,
    }
}

// Block on whichever comes first: a command, the retry timer, or shutdown.
async fn matchmaker_task<C>(
    mut matchmaker: Matchmaker<C>,
    mut command_rx: mpsc::Receiver<Command>,
    retry_interval: Duration,
    shutdown: Arc<Notify>,
) where
    C: Clock,
{
    let mut interval = tokio::time::interval(retry_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                info!("matchmaker shutting down");
                break;
            }
            command = command_rx.recv() => {
                match command {
                    Some(command) => matchmaker.handle(command),
                    // Every handle is gone; nobody can reach the pool anymore.
                    None => break,
                }
            }
            _ = interval.tick() => {
                let matched = matchmaker.retry();
                if matched == 0 && !matchmaker.pool().is_empty() {
                    debug!(waiting = matchmaker.pool().len(), "no match on retry");
                }
            }
        }
    }
}

fn build_ticket_id(player_id: &PlayerId, now: Timestamp) -> String {
    format!("ticket-{}-{}", now.as_epoch_millis(), player_id)
}

fn build_match_id() -> String {
    format!("match-{}", Uuid::new_v4())
}
