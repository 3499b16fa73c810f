//! User record.

use crate::model::resource::{FieldSpec, RecordId, Resource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub firstname: String,
    pub lastname: String,
    /// Unique across all users; enforced by the store.
    pub email: String,
    pub city: String,
    pub language: String,
}

impl Resource for User {
    const NAME: &'static str = "user";
    const COLLECTION: &'static str = "users";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("firstname"),
        FieldSpec::text("lastname"),
        FieldSpec::text("email"),
        FieldSpec::text("city"),
        FieldSpec::text("language"),
    ];
}
