//! Connection bootstrap, schema versioning and the shared store handle.
//!
//! Callers get a `Connection` only after `open_db` has migrated it to the
//! schema this binary ships (`migrations::latest_version`). Request workers
//! reach that connection through `Store`.

mod error;
pub mod migrations;
mod open;
mod store;

pub use error::{DbError, DbResult};
pub use open::{open_db, open_db_in_memory};
pub use store::Store;
