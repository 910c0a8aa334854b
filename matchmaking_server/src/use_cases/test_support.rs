use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::Timestamp;
use crate::domain::ports::Clock;

// Fixed time source so wait-time assertions are deterministic.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_epoch_millis(self.0)
    }
}

// Clock that tests move forward by hand; clones share the same reading.
#[derive(Clone)]
pub(crate) struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub(crate) fn new(start_millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_epoch_millis(self.millis.load(Ordering::SeqCst))
    }
}
