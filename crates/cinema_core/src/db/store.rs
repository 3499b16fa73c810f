//! Process-wide shared SQLite handle.
//!
//! # Responsibility
//! - Own the single connection opened at startup.
//! - Serialize access from concurrent request workers.
//!
//! # Invariants
//! - The connection is only reachable through `with_conn`, one caller at a time.
//! - A panic while holding the lock poisons the store; later callers get
//!   `DbError::Poisoned` instead of a possibly half-written connection.

use super::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Cloneable handle to the shared connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wraps an already-bootstrapped connection (see `open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` with exclusive access to the connection.
    ///
    /// Blocks the calling thread while waiting for the lock and while `op`
    /// runs; async callers should invoke this from a blocking task.
    pub fn with_conn<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let guard = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        op(&guard)
    }

    /// Closes the connection when this is the last handle.
    ///
    /// Other live handles keep the connection open; it is then closed when
    /// the last one is dropped.
    pub fn close(self) -> DbResult<()> {
        let mutex = match Arc::try_unwrap(self.conn) {
            Ok(mutex) => mutex,
            Err(_) => {
                warn!("event=db_close module=db status=deferred reason=shared_handles");
                return Ok(());
            }
        };
        let conn = mutex.into_inner().map_err(|_| DbError::Poisoned)?;
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=db_close module=db status=ok");
        Ok(())
    }
}
