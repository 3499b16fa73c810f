//! Required-field validation for client payloads.
//!
//! # Responsibility
//! - Check a payload against a resource's field schema without touching
//!   storage or transport concerns.
//!
//! # Invariants
//! - Unknown payload keys are ignored.
//! - Violations are reported for every failing field, in schema order.
//! - An empty payload yields one `Missing` violation per required field.

use crate::model::resource::{FieldKind, FieldSpec, Payload};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Key absent or explicitly `null`.
    Missing,
    /// Text value that is empty after trimming.
    Empty,
    /// Value present but of the wrong JSON type.
    WrongType(FieldKind),
}

/// One rejected field, serialized as `{ "field": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
    #[serde(skip)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    fn new(field: &'static str, kind: ViolationKind) -> Self {
        let message = match kind {
            ViolationKind::Missing => "This field is required".to_string(),
            ViolationKind::Empty => "This field cannot be empty".to_string(),
            ViolationKind::WrongType(FieldKind::Text) => "This field must be a string".to_string(),
            ViolationKind::WrongType(FieldKind::Integer) => {
                "This field must be an integer".to_string()
            }
        };
        Self {
            field,
            message,
            kind,
        }
    }
}

/// Payload rejected by required-field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the rejected fields, in schema order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|violation| violation.field).collect()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid payload: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Validates `payload` against `fields`.
///
/// Returns `Ok(())` when every field is present, non-empty and of the
/// declared kind.
pub fn validate_fields(fields: &[FieldSpec], payload: &Payload) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = fields
        .iter()
        .filter_map(|spec| check_field(spec, payload.get(spec.name)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn check_field(spec: &FieldSpec, value: Option<&Value>) -> Option<FieldViolation> {
    let kind = match (spec.kind, value) {
        (_, None | Some(Value::Null)) => ViolationKind::Missing,
        (FieldKind::Text, Some(Value::String(text))) if text.trim().is_empty() => {
            ViolationKind::Empty
        }
        (FieldKind::Text, Some(Value::String(_))) => return None,
        (FieldKind::Integer, Some(Value::Number(number))) if number.is_i64() => return None,
        (expected, Some(_)) => ViolationKind::WrongType(expected),
    };
    Some(FieldViolation::new(spec.name, kind))
}

#[cfg(test)]
mod tests {
    use super::{validate_fields, ViolationKind};
    use crate::model::resource::{FieldKind, FieldSpec, Payload};
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[FieldSpec::text("title"), FieldSpec::integer("duration")];

    fn payload(value: serde_json::Value) -> Payload {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn accepts_complete_payload_and_ignores_extra_keys() {
        let body = payload(json!({ "title": "Alien", "duration": 117, "rating": "R" }));
        assert!(validate_fields(FIELDS, &body).is_ok());
    }

    #[test]
    fn empty_payload_reports_every_field_missing() {
        let err = validate_fields(FIELDS, &Payload::new()).unwrap_err();
        assert_eq!(err.fields(), vec!["title", "duration"]);
        assert!(err
            .violations()
            .iter()
            .all(|violation| violation.kind == ViolationKind::Missing));
    }

    #[test]
    fn null_counts_as_missing_and_blank_text_as_empty() {
        let body = payload(json!({ "title": "   ", "duration": null }));
        let err = validate_fields(FIELDS, &body).unwrap_err();
        assert_eq!(err.violations()[0].kind, ViolationKind::Empty);
        assert_eq!(err.violations()[1].kind, ViolationKind::Missing);
    }

    #[test]
    fn wrong_json_types_are_rejected() {
        let body = payload(json!({ "title": 12, "duration": "117" }));
        let err = validate_fields(FIELDS, &body).unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::WrongType(FieldKind::Text)
        );
        assert_eq!(
            err.violations()[1].kind,
            ViolationKind::WrongType(FieldKind::Integer)
        );
    }

    #[test]
    fn fractional_number_is_not_an_integer() {
        let body = payload(json!({ "title": "Alien", "duration": 117.5 }));
        let err = validate_fields(FIELDS, &body).unwrap_err();
        assert_eq!(err.fields(), vec!["duration"]);
    }

    #[test]
    fn display_lists_each_violation() {
        let err = validate_fields(FIELDS, &Payload::new()).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("title: This field is required"));
        assert!(rendered.contains("duration: This field is required"));
    }

    #[test]
    fn violations_serialize_without_internal_kind() {
        let err = validate_fields(FIELDS, &Payload::new()).unwrap_err();
        let json = serde_json::to_value(err.violations()).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({ "field": "title", "message": "This field is required" })
        );
    }
}
