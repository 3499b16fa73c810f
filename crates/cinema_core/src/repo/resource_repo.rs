//! Resource repository contract and generic SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/insert/update/delete over one resource table.
//! - Map rows back into typed records via the resource field schema.
//!
//! # Invariants
//! - SQL text is assembled only from static table and column names.
//! - Each operation is a single statement; no transaction spans calls.
//! - Missing payload fields are bound as `NULL` and left to the store's
//!   `NOT NULL` constraints.

use crate::db::DbError;
use crate::model::resource::{FieldKind, Payload, RecordId, Resource};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use serde_json::Value as JsonValue;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for resource persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        resource: &'static str,
        id: RecordId,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for one resource type.
pub trait ResourceRepository<R: Resource> {
    /// All records, in insertion order.
    fn list(&self) -> RepoResult<Vec<R>>;
    /// One record, or `None` when no row has this id.
    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<R>>;
    /// Persists a new record and returns its generated id.
    fn insert(&self, fields: &Payload) -> RepoResult<RecordId>;
    /// Overwrites every mutable field of an existing record.
    fn update(&self, id: RecordId, fields: &Payload) -> RepoResult<()>;
    /// Removes a record.
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed repository for any `Resource`.
pub struct SqliteResourceRepository<'conn, R> {
    conn: &'conn Connection,
    _resource: PhantomData<fn() -> R>,
}

impl<'conn, R: Resource> SqliteResourceRepository<'conn, R> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _resource: PhantomData,
        }
    }

    fn select_sql() -> String {
        let columns = R::FIELDS
            .iter()
            .map(|field| field.name)
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT id, {columns} FROM {}", R::COLLECTION)
    }

    fn not_found(id: RecordId) -> RepoError {
        RepoError::NotFound {
            resource: R::NAME,
            id,
        }
    }
}

impl<R: Resource> ResourceRepository<R> for SqliteResourceRepository<'_, R> {
    fn list(&self) -> RepoResult<Vec<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row::<R>(row)?);
        }

        Ok(records)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row::<R>(row)?));
        }

        Ok(None)
    }

    fn insert(&self, fields: &Payload) -> RepoResult<RecordId> {
        let columns = R::FIELDS
            .iter()
            .map(|field| field.name)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=R::FIELDS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");

        self.conn.execute(
            &format!(
                "INSERT INTO {} ({columns}) VALUES ({placeholders});",
                R::COLLECTION
            ),
            params_from_iter(bind_values::<R>(fields)),
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: RecordId, fields: &Payload) -> RepoResult<()> {
        let assignments = R::FIELDS
            .iter()
            .enumerate()
            .map(|(index, field)| format!("{} = ?{}", field.name, index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_placeholder = R::FIELDS.len() + 1;

        let mut values = bind_values::<R>(fields);
        values.push(Value::Integer(id));

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE id = ?{id_placeholder};",
                R::COLLECTION
            ),
            params_from_iter(values),
        )?;

        if changed == 0 {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", R::COLLECTION),
            [id],
        )?;

        if changed == 0 {
            return Err(Self::not_found(id));
        }

        Ok(())
    }
}

/// Binds one value per schema field, in column order.
fn bind_values<R: Resource>(fields: &Payload) -> Vec<Value> {
    R::FIELDS
        .iter()
        .map(|field| json_to_sql(fields.get(field.name)))
        .collect()
}

fn json_to_sql(value: Option<&JsonValue>) -> Value {
    match value {
        None | Some(JsonValue::Null) => Value::Null,
        Some(JsonValue::Bool(flag)) => Value::Integer(i64::from(*flag)),
        Some(JsonValue::Number(number)) => match number.as_i64() {
            Some(integer) => Value::Integer(integer),
            None => Value::Real(number.as_f64().unwrap_or(f64::NAN)),
        },
        Some(JsonValue::String(text)) => Value::Text(text.clone()),
        Some(nested) => Value::Text(nested.to_string()),
    }
}

fn parse_record_row<R: Resource>(row: &Row<'_>) -> RepoResult<R> {
    let mut object = Payload::new();
    object.insert("id".to_string(), JsonValue::from(row.get::<_, i64>("id")?));

    for field in R::FIELDS {
        let value = match field.kind {
            FieldKind::Text => JsonValue::from(row.get::<_, String>(field.name)?),
            FieldKind::Integer => JsonValue::from(row.get::<_, i64>(field.name)?),
        };
        object.insert(field.name.to_string(), value);
    }

    serde_json::from_value(JsonValue::Object(object)).map_err(|err| {
        RepoError::InvalidData(format!("{} row does not match schema: {err}", R::NAME))
    })
}
