//! Request middleware: payload validation and access logging.
//!
//! # Responsibility
//! - Reject create requests whose payload misses required fields before any
//!   handler or store work happens.
//! - Log one line per request with status and duration.

use crate::error::ApiError;
use crate::handlers::parse_payload;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use cinema_core::{Payload, Resource};
use log::{info, warn};
use std::time::Instant;

/// Payload that already passed `Resource::validate`, handed to the handler
/// through request extensions.
#[derive(Debug, Clone)]
pub struct ValidatedPayload(pub Payload);

/// Validates the JSON body against `R`'s required fields.
///
/// Short-circuits with 422 on failure; otherwise forwards the request with
/// the parsed payload attached and an empty body. Bodies that cannot be
/// buffered get the same rejection as the `Bytes` extractor (413 over the
/// default body limit, 400 otherwise). Non-JSON or non-object bodies
/// validate as an empty payload.
pub async fn validate_payload<R: Resource>(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match Bytes::from_request(Request::new(body), &()).await {
        Ok(bytes) => bytes,
        Err(rejection) => {
            warn!(
                "event=body_rejected module=http resource={} status={} error={}",
                R::NAME,
                rejection.status().as_u16(),
                rejection.body_text()
            );
            return rejection.into_response();
        }
    };
    let payload = parse_payload(&bytes);

    if let Err(err) = R::validate(&payload) {
        return ApiError::ValidationFailed(err).into_response();
    }

    let mut request = Request::from_parts(parts, Body::empty());
    request.extensions_mut().insert(ValidatedPayload(payload));
    next.run(request).await
}

pub async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
