//! Worker state repository contract and SQLite implementation.
//!
//! # Invariants
//! - Exactly one row per origin; `save_state` overwrites it.
//! - Read paths reject invalid persisted values instead of masking them.
//! - No locking beyond SQLite's own statement atomicity; concurrent contexts
//!   may interleave load/save freely.

use crate::db::DbError;
use crate::model::state::WorkerState;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type RepoResult<T> = Result<T, RepoError>;

/// Worker state persistence error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// The connection guard was poisoned by a panicking holder.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted worker state: {message}"),
            Self::Unavailable(message) => write!(f, "state store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value contract over the single worker state record.
pub trait StateRepository: Send + Sync {
    /// Returns `None` when no record exists yet.
    fn load_state(&self) -> RepoResult<Option<WorkerState>>;
    fn save_state(&self, state: &WorkerState) -> RepoResult<()>;
}

/// SQLite-backed worker state repository scoped to one origin.
pub struct SqliteStateRepository {
    conn: Mutex<Connection>,
    origin: String,
}

impl SqliteStateRepository {
    /// Wraps a migrated connection; see [`crate::db::open_db`].
    pub fn new(conn: Connection, origin: impl Into<String>) -> Self {
        Self {
            conn: Mutex::new(conn),
            origin: origin.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn with_conn<T>(&self, op: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|err| RepoError::Unavailable(err.to_string()))?;
        op(&guard)
    }
}

impl StateRepository for SqliteStateRepository {
    fn load_state(&self) -> RepoResult<Option<WorkerState>> {
        self.with_conn(|conn| {
            let stored = conn
                .query_row(
                    "SELECT latest_update_timestamp_ms
                     FROM worker_state
                     WHERE origin = ?1;",
                    [self.origin.as_str()],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;

            match stored {
                Some(value) if value < 0 => Err(RepoError::InvalidData(format!(
                    "negative latest_update_timestamp_ms `{value}` for origin `{}`",
                    self.origin
                ))),
                Some(value) => Ok(Some(WorkerState::new(value))),
                None => Ok(None),
            }
        })
    }

    fn save_state(&self, state: &WorkerState) -> RepoResult<()> {
        if state.latest_update_timestamp_ms < 0 {
            return Err(RepoError::InvalidData(format!(
                "refusing to persist negative timestamp `{}`",
                state.latest_update_timestamp_ms
            )));
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO worker_state (origin, latest_update_timestamp_ms, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
                 ON CONFLICT(origin) DO UPDATE SET
                    latest_update_timestamp_ms = excluded.latest_update_timestamp_ms,
                    updated_at = excluded.updated_at;",
                params![self.origin.as_str(), state.latest_update_timestamp_ms],
            )?;
            Ok(())
        })
    }
}
