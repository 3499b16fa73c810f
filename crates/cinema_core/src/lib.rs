//! Core domain logic for the cinema API.
//! Resource schemas, payload validation and SQLite persistence live here;
//! HTTP concerns do not.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::movie::Movie;
pub use model::resource::{FieldKind, FieldSpec, Payload, RecordId, Resource};
pub use model::user::User;
pub use model::validation::{validate_fields, FieldViolation, ValidationError, ViolationKind};
pub use repo::resource_repo::{
    RepoError, RepoResult, ResourceRepository, SqliteResourceRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
