//! Shared helpers for HTTP integration tests.

use cinema_core::{open_db_in_memory, Store};
use serde_json::Value;

/// Starts the API on an ephemeral port over a fresh in-memory store.
///
/// Returns the base URL and a store handle for direct inspection.
pub async fn start_server() -> (String, Store) {
    let store = Store::new(open_db_in_memory().unwrap());
    let app = cinema_http::router(store.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), store)
}

pub async fn post_json(base: &str, path: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(body)
        .send()
        .await
        .unwrap()
}

pub fn assert_json(resp: &reqwest::Response) {
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.contains("json"),
        "expected JSON content type, got `{content_type}`"
    );
}
