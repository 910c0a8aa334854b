use crate::domain::player::Timestamp;

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
