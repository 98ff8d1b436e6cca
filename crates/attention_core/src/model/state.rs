//! Durable worker state.
//!
//! # Invariants
//! - One record per origin.
//! - `latest_update_timestamp_ms` only moves when a check cycle starts.

use serde::{Deserialize, Serialize};

/// Unix epoch milliseconds.
pub type TimestampMs = i64;

/// Sentinel meaning "no check cycle has ever started".
pub const NEVER_TIMESTAMP_MS: TimestampMs = 0;

/// Single persisted record shared by every execution context of one origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerState {
    pub latest_update_timestamp_ms: TimestampMs,
}

impl WorkerState {
    pub fn new(latest_update_timestamp_ms: TimestampMs) -> Self {
        Self {
            latest_update_timestamp_ms,
        }
    }

    pub fn is_never(&self) -> bool {
        self.latest_update_timestamp_ms == NEVER_TIMESTAMP_MS
    }
}

impl Default for WorkerState {
    fn default() -> Self {
        Self::new(NEVER_TIMESTAMP_MS)
    }
}
