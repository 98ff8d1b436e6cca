//! Throttle gate in front of every check cycle.
//!
//! # Invariants
//! - A throttled decision performs no state mutation.
//! - A proceeding decision persists `now` before returning, so the write
//!   lands before any fetch starts. No rollback happens if the cycle later
//!   fails.
//! - No cross-context locking: two contexts may both read the same cutoff.

use crate::model::state::TimestampMs;
use crate::service::state_manager::StateManager;
use log::info;

/// Outcome of the throttle gate for one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Less than one interval since the last started cycle.
    Throttled { elapsed_ms: i64 },
    /// Cycle proceeds; `cutoff_ms` is the exclusive lower bound for relevance.
    Proceed {
        cutoff_ms: TimestampMs,
        now_ms: TimestampMs,
    },
}

/// Pure decision: throttled iff `now - previous < interval`.
pub fn decide(now_ms: TimestampMs, previous_ms: TimestampMs, interval_ms: u64) -> ThrottleDecision {
    let elapsed_ms = now_ms.saturating_sub(previous_ms);
    let interval = i64::try_from(interval_ms).unwrap_or(i64::MAX);
    if elapsed_ms < interval {
        ThrottleDecision::Throttled { elapsed_ms }
    } else {
        ThrottleDecision::Proceed {
            cutoff_ms: previous_ms,
            now_ms,
        }
    }
}

/// Loads the previous timestamp, decides, and optimistically persists `now`.
pub fn begin_cycle(state: &StateManager, now_ms: TimestampMs, interval_ms: u64) -> ThrottleDecision {
    let previous = state.load().latest_update_timestamp_ms;
    let decision = decide(now_ms, previous, interval_ms);
    match decision {
        ThrottleDecision::Throttled { elapsed_ms } => {
            info!(
                "event=check_cycle module=throttle status=skip reason=throttled elapsed_ms={} interval_ms={}",
                elapsed_ms, interval_ms
            );
        }
        ThrottleDecision::Proceed { cutoff_ms, now_ms } => {
            let persisted = state.save(now_ms);
            info!(
                "event=check_cycle module=throttle status=start cutoff_ms={} now_ms={} persisted={}",
                cutoff_ms, now_ms, persisted
            );
        }
    }
    decision
}
