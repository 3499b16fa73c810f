//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define resource-level data access contracts.
//! - Isolate SQL details from HTTP orchestration.
//!
//! # Invariants
//! - Every client value reaches SQLite as a bound parameter.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod resource_repo;
