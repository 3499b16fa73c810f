//! Static route table.
//!
//! ## Routes (per resource, `movies` and `users`)
//!
//! - `GET /api/{resource}` list
//! - `GET /api/{resource}/:id` get by id
//! - `POST /api/{resource}` create, behind `validate_payload`
//! - `PUT /api/{resource}/:id` update
//! - `DELETE /api/{resource}/:id` delete
//! - `GET /health` liveness

use crate::handlers;
use crate::middleware::{log_request, validate_payload};
use axum::handler::Handler;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use cinema_core::{Movie, Resource, Store, User};

/// Builds the application router over the shared store.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(resource_routes::<Movie>())
        .merge(resource_routes::<User>())
        .layer(from_fn(log_request))
        .with_state(store)
}

/// Collection and item routes for one resource.
fn resource_routes<R: Resource>() -> Router<Store> {
    let collection = format!("/api/{}", R::COLLECTION);
    let item = format!("{collection}/:id");

    Router::new()
        .route(
            &collection,
            get(handlers::list::<R>)
                .post(handlers::create::<R>.layer(from_fn(validate_payload::<R>))),
        )
        .route(
            &item,
            get(handlers::get_by_id::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
}
