//! Generic resource description shared by movies and users.
//!
//! # Responsibility
//! - Name the table/collection behind a resource.
//! - Enumerate the mutable fields with their expected kinds.
//!
//! # Invariants
//! - `FIELDS` lists columns in declaration order; it never contains `id`.
//! - Field and table names are static; they are the only identifiers that
//!   ever end up in SQL text.

use crate::model::validation::{validate_fields, ValidationError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store-assigned record identifier (auto-increment primary key).
pub type RecordId = i64;

/// Untyped client payload: field name -> JSON value.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Scalar kind of a resource field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string, SQLite `TEXT`.
    Text,
    /// JSON integer, SQLite `INTEGER`.
    Integer,
}

/// One required, mutable field of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }
}

/// Static description of an API resource.
///
/// Implementors are plain records whose serde shape is `id` plus every
/// entry in `FIELDS`.
pub trait Resource: Serialize + DeserializeOwned + Send + 'static {
    /// Singular name used in diagnostics (`movie`).
    const NAME: &'static str;
    /// Table name, also the URL collection segment (`movies`).
    const COLLECTION: &'static str;
    /// Required mutable fields in column order.
    const FIELDS: &'static [FieldSpec];

    /// Checks a candidate payload against this resource's required fields.
    fn validate(payload: &Payload) -> Result<(), ValidationError> {
        validate_fields(Self::FIELDS, payload)
    }
}
