//! Ordered schema steps for the worker state database.
//!
//! # Invariants
//! - Step versions are strictly increasing; the last one is `SCHEMA_VERSION`.
//! - All pending steps and the `user_version` bump commit in one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(version, sql)` pairs, applied in order.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_worker_state.sql"))];

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let pending = STEPS.iter().filter(|(version, _)| *version > found);
    let tx = conn.transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{STEPS, SCHEMA_VERSION};

    #[test]
    fn last_step_matches_schema_version() {
        assert!(STEPS.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert_eq!(STEPS.last().map(|(version, _)| *version), Some(SCHEMA_VERSION));
    }
}
