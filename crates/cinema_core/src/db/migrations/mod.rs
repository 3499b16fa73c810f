//! Embedded schema steps, applied in order and recorded in
//! `PRAGMA user_version`.
//!
//! Step `n` lives at index `n - 1`; a new table means a new file appended
//! here, never an edit to a shipped one.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: [&str; 2] = [
    include_str!("0001_movies.sql"),
    include_str!("0002_users.sql"),
];

/// Schema version a fully migrated database reports.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Brings `conn` up to `latest_version()` inside a single transaction.
///
/// A database already at the latest version is left untouched; one ahead of
/// it is refused with `DbError::SchemaAhead`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaAhead { found, supported });
    }

    let pending = &STEPS[found as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in (found + 1..).zip(pending) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={} to={}",
        found, supported
    );
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
