//! Request handlers, one per verb, generic over the resource.
//!
//! # Responsibility
//! - Parse path ids and bodies.
//! - Run repository calls on the shared store off the async runtime.
//! - Turn outcomes into status codes and JSON bodies.
//!
//! # Invariants
//! - `create` only runs behind `validate_payload`; it never validates itself.
//! - `update` performs no validation; the store's constraints decide.

use crate::error::ApiError;
use crate::middleware::ValidatedPayload;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use cinema_core::{
    core_version, Payload, RecordId, RepoResult, Resource, ResourceRepository,
    SqliteResourceRepository, Store,
};
use log::{debug, error};
use serde::Serialize;
use serde_json::{json, Value};

/// Body returned by a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: RecordId,
}

/// `GET /api/{resource}`
pub async fn list<R: Resource>(State(store): State<Store>) -> Result<Json<Vec<R>>, ApiError> {
    let records = run_repo::<R, _, _>(&store, "list", |repo| repo.list()).await?;
    Ok(Json(records))
}

/// `GET /api/{resource}/:id`
pub async fn get_by_id<R: Resource>(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
) -> Result<Json<R>, ApiError> {
    let id = parse_id(&raw_id)?;
    run_repo::<R, _, _>(&store, "get", move |repo| repo.get_by_id(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/{resource}`
pub async fn create<R: Resource>(
    State(store): State<Store>,
    Extension(ValidatedPayload(payload)): Extension<ValidatedPayload>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = run_repo::<R, _, _>(&store, "insert", move |repo| repo.insert(&payload)).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `PUT /api/{resource}/:id`
pub async fn update<R: Resource>(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    let payload = parse_payload(&body);
    run_repo::<R, _, _>(&store, "update", move |repo| repo.update(id, &payload)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/{resource}/:id`
pub async fn delete<R: Resource>(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    run_repo::<R, _, _>(&store, "delete", move |repo| repo.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "version": core_version() }))
}

/// Reads a JSON object body; anything else counts as an empty payload.
pub(crate) fn parse_payload(body: &[u8]) -> Payload {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

/// Only plain decimal digits name a record; `+1`, ` 1` and `abc` do not.
fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    raw.parse::<RecordId>().map_err(|_| ApiError::NotFound)
}

async fn run_repo<R, T, F>(store: &Store, op: &'static str, call: F) -> Result<T, ApiError>
where
    R: Resource,
    T: Send + 'static,
    F: FnOnce(&SqliteResourceRepository<'_, R>) -> RepoResult<T> + Send + 'static,
{
    let store = store.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        store.with_conn(|conn| call(&SqliteResourceRepository::<R>::new(conn)))
    })
    .await;

    match outcome {
        Ok(Ok(value)) => {
            debug!(
                "event=repo_call module=http resource={} op={} status=ok",
                R::NAME,
                op
            );
            Ok(value)
        }
        Ok(Err(err)) => {
            debug!(
                "event=repo_call module=http resource={} op={} status=error error={}",
                R::NAME,
                op,
                err
            );
            Err(err.into())
        }
        Err(join_err) => {
            error!(
                "event=repo_call module=http resource={} op={} status=error error_code=worker_failed error={}",
                R::NAME,
                op,
                join_err
            );
            Err(ApiError::Store(join_err.to_string()))
        }
    }
}
