//! Resource model for the movies/users API.
//!
//! # Responsibility
//! - Define the typed records returned by reads.
//! - Describe each resource's mutable field schema so validation and
//!   persistence can be written once for every resource.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer `RecordId`.
//! - Deletion removes the row; there are no tombstones.

pub mod movie;
pub mod resource;
pub mod user;
pub mod validation;
