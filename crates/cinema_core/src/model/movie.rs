//! Movie record.

use crate::model::resource::{FieldSpec, RecordId, Resource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: RecordId,
    pub title: String,
    pub director: String,
    /// Release year as submitted (stored as text).
    pub year: String,
    /// Free-form color flag, e.g. `"1"` for color and `"0"` for black and white.
    pub color: String,
    /// Runtime in minutes.
    pub duration: i64,
}

impl Resource for Movie {
    const NAME: &'static str = "movie";
    const COLLECTION: &'static str = "movies";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("title"),
        FieldSpec::text("director"),
        FieldSpec::text("year"),
        FieldSpec::text("color"),
        FieldSpec::integer("duration"),
    ];
}
