//! Best-effort access to the single durable worker state record.
//!
//! # Invariants
//! - `load` never fails: missing or unreadable state yields the "never"
//!   default.
//! - `save` never aborts the caller: failures are logged and reported as
//!   `false`.

use crate::model::state::{TimestampMs, WorkerState};
use crate::repo::state_repo::StateRepository;
use log::{debug, warn};
use std::sync::Arc;

/// Owns the worker state record on behalf of the engine.
#[derive(Clone)]
pub struct StateManager {
    repo: Arc<dyn StateRepository>,
}

impl StateManager {
    pub fn new(repo: Arc<dyn StateRepository>) -> Self {
        Self { repo }
    }

    /// Returns the last persisted state, or the default when absent/unreadable.
    pub fn load(&self) -> WorkerState {
        match self.repo.load_state() {
            Ok(Some(state)) => {
                debug!(
                    "event=state_load module=state status=ok latest_update_timestamp_ms={}",
                    state.latest_update_timestamp_ms
                );
                state
            }
            Ok(None) => {
                debug!("event=state_load module=state status=ok record=absent");
                WorkerState::default()
            }
            Err(err) => {
                warn!(
                    "event=state_load module=state status=error error_code=store_unavailable error={}",
                    err
                );
                WorkerState::default()
            }
        }
    }

    /// Overwrites the record with `timestamp_ms`. Returns whether it persisted.
    pub fn save(&self, timestamp_ms: TimestampMs) -> bool {
        match self.repo.save_state(&WorkerState::new(timestamp_ms)) {
            Ok(()) => {
                debug!(
                    "event=state_save module=state status=ok latest_update_timestamp_ms={}",
                    timestamp_ms
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=state_save module=state status=error error_code=store_unavailable error={}",
                    err
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StateManager;
    use crate::db::DbError;
    use crate::model::state::WorkerState;
    use crate::repo::state_repo::{RepoError, RepoResult, StateRepository};
    use std::sync::Arc;

    struct BrokenRepository;

    impl StateRepository for BrokenRepository {
        fn load_state(&self) -> RepoResult<Option<WorkerState>> {
            Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
                db_version: 9,
                latest_supported: 1,
            }))
        }

        fn save_state(&self, _state: &WorkerState) -> RepoResult<()> {
            Err(RepoError::Unavailable("disk gone".to_string()))
        }
    }

    #[test]
    fn unreachable_store_degrades_to_defaults() {
        let manager = StateManager::new(Arc::new(BrokenRepository));
        assert!(manager.load().is_never());
        assert!(!manager.save(42));
    }
}
