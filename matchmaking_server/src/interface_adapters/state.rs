use crate::domain::Timestamp;
use crate::domain::ports::Clock;
use crate::use_cases::MatchmakerHandle;
use std::time::{SystemTime, UNIX_EPOCH};

// Shared application state for the HTTP handlers.
pub struct AppState {
    pub matchmaker: MatchmakerHandle,
}

// System clock adapter used by the matchmaker.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Timestamp::from_epoch_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}
