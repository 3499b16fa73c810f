//! HTTP surface for the cinema API.
//!
//! # Responsibility
//! - Map verb + path onto generic resource handlers.
//! - Translate core outcomes into status codes; no other layer does.
//!
//! # See also
//! - `cinema_core` for validation and persistence.

pub mod error;
mod handlers;
mod middleware;
mod router;

pub use error::ApiError;
pub use router::router;

/// Serves the router on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests are drained before this returns.
pub async fn serve(
    listener: tokio::net::TcpListener,
    store: cinema_core::Store,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}
