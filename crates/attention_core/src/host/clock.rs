//! Wall clock capability.

use crate::model::state::TimestampMs;

pub trait Clock: Send + Sync {
    /// Current wall-clock time in Unix epoch milliseconds.
    fn now_ms(&self) -> TimestampMs;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        chrono::Utc::now().timestamp_millis()
    }
}
