//! JSON REST API for Manitto.
//!
//! Exposes an axum [`Router`] backed by any [`manitto_core::RecordStore`].
//! Static front-end serving, CORS, and transport concerns are the caller's
//! responsibility.
//!
//! Each request reads whole snapshots, computes, and writes whole snapshots
//! back without locking, so two admin calls racing each other resolve as
//! last-writer-wins.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", manitto_api::api_router(store.clone()))
//! ```

pub mod admin;
pub mod body;
pub mod error;
pub mod lookup;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use manitto_core::RecordStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Admin
    .route("/admin/upload", post(admin::upload::<S>))
    .route("/admin/match", post(admin::run_match::<S>))
    .route("/admin/results", get(admin::results::<S>))
    // Employee
    .route("/lookup", post(lookup::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use manitto_core::{Match, lookup::LookupResult, store::Collection};
  use manitto_store_json::JsonFileStore;
  use manitto_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use crate::admin::AdminResponse;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn call<S>(
    store: Arc<S>,
    method: &str,
    uri: &str,
    body: &str,
  ) -> (StatusCode, Vec<u8>)
  where
    S: RecordStore + 'static,
  {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, bytes.to_vec())
  }

  fn error_message(bytes: &[u8]) -> String {
    let v: Value = serde_json::from_slice(bytes).unwrap();
    v["error"].as_str().unwrap().to_owned()
  }

  fn alice_and_bob() -> String {
    json!([
      { "table": 1, "name": "Alice", "email": "A@X.com", "birthdate": "900101" },
      { "table": 1, "name": "Bob", "email": "b@x.com", "birthdate": "900202" },
    ])
    .to_string()
  }

  async fn upload_and_match(store: Arc<SqliteStore>) {
    let (status, _) = call(store.clone(), "POST", "/admin/upload", &alice_and_bob()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(store, "POST", "/admin/match", r#"{"seed": 1}"#).await;
    assert_eq!(status, StatusCode::OK);
  }

  // ── Upload ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn upload_reports_count() {
    let store = make_store().await;
    let (status, bytes) = call(store, "POST", "/admin/upload", &alice_and_bob()).await;
    assert_eq!(status, StatusCode::OK);
    let resp: AdminResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(resp.count, 2);
  }

  #[tokio::test]
  async fn upload_rejects_non_array() {
    let store = make_store().await;
    let (status, bytes) =
      call(store.clone(), "POST", "/admin/upload", r#"{"name":"Alice"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&bytes).is_empty());

    let (status, _) = call(store, "POST", "/admin/upload", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn malformed_upload_leaves_roster_untouched() {
    let store = make_store().await;
    upload_and_match(store.clone()).await;

    let bad = r#"[{"table": 1, "name": "Carol", "email": "c@x.com"}]"#;
    let (status, _) = call(store.clone(), "POST", "/admin/upload", bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, bytes) = call(store, "GET", "/admin/results", "").await;
    let matches: Vec<Match> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(matches.len(), 2);
  }

  #[tokio::test]
  async fn upload_clears_existing_matches() {
    let store = make_store().await;
    upload_and_match(store.clone()).await;

    let (_, bytes) = call(store.clone(), "GET", "/admin/results", "").await;
    let matches: Vec<Match> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(matches.len(), 2);

    let (status, _) = call(store.clone(), "POST", "/admin/upload", &alice_and_bob()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = call(store, "GET", "/admin/results", "").await;
    assert_eq!(status, StatusCode::OK);
    let matches: Vec<Match> = serde_json::from_slice(&bytes).unwrap();
    assert!(matches.is_empty());
  }

  // ── Match ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn match_without_participants_is_rejected() {
    let store = make_store().await;
    let (status, _) = call(store, "POST", "/admin/match", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn match_with_non_numeric_seed_is_rejected() {
    let store = make_store().await;
    call(store.clone(), "POST", "/admin/upload", &alice_and_bob()).await;
    let (status, bytes) = call(store, "POST", "/admin/match", r#"{"seed":"abc"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&bytes).contains("seed"));
  }

  #[tokio::test]
  async fn undersized_table_fails_and_persists_nothing() {
    let store = make_store().await;
    let roster = json!([
      { "table": 1, "name": "Alice", "email": "a@x.com", "birthdate": "900101" },
      { "table": 1, "name": "Bob", "email": "b@x.com", "birthdate": "900202" },
      { "table": 2, "name": "Carol", "email": "c@x.com", "birthdate": "900303" },
    ])
    .to_string();
    call(store.clone(), "POST", "/admin/upload", &roster).await;

    let (status, bytes) = call(store.clone(), "POST", "/admin/match", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&bytes).contains("table 2"));

    let (_, bytes) = call(store, "GET", "/admin/results", "").await;
    let matches: Vec<Match> = serde_json::from_slice(&bytes).unwrap();
    assert!(matches.is_empty());
  }

  #[tokio::test]
  async fn seeded_match_is_reproducible() {
    let store = make_store().await;
    let roster = json!([
      { "table": 3, "name": "A", "email": "a@x.com", "birthdate": "1" },
      { "table": 3, "name": "B", "email": "b@x.com", "birthdate": "2" },
      { "table": 3, "name": "C", "email": "c@x.com", "birthdate": "3" },
      { "table": 3, "name": "D", "email": "d@x.com", "birthdate": "4" },
      { "table": 3, "name": "E", "email": "e@x.com", "birthdate": "5" },
    ])
    .to_string();
    call(store.clone(), "POST", "/admin/upload", &roster).await;

    call(store.clone(), "POST", "/admin/match", r#"{"seed": "2024"}"#).await;
    let (_, first) = call(store.clone(), "GET", "/admin/results", "").await;
    call(store.clone(), "POST", "/admin/match", r#"{"seed": 2024}"#).await;
    let (_, second) = call(store, "GET", "/admin/results", "").await;

    let first: Vec<Match> = serde_json::from_slice(&first).unwrap();
    let second: Vec<Match> = serde_json::from_slice(&second).unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
  }

  // ── Lookup ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn lookup_returns_recipient() {
    let store = make_store().await;
    upload_and_match(store.clone()).await;

    let (status, bytes) = call(
      store.clone(),
      "POST",
      "/lookup",
      r#"{"name":"Alice","birthdate":"900101"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result: LookupResult = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(result.your_name, "Alice");
    assert_eq!(result.table, 1);
    assert_eq!(result.manitti_name, "Bob");
    assert_eq!(result.manitti_email, "b@x.com");
    assert!(result.message.contains("Bob"));

    let (status, bytes) = call(
      store,
      "POST",
      "/lookup",
      r#"{"name":"Bob","birthdate":" 900202 "}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result: LookupResult = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(result.manitti_name, "Alice");
    assert_eq!(result.manitti_email, "a@x.com");
  }

  #[tokio::test]
  async fn lookup_status_codes() {
    let store = make_store().await;
    call(store.clone(), "POST", "/admin/upload", &alice_and_bob()).await;

    // Matching not yet run.
    let (status, _) = call(
      store.clone(),
      "POST",
      "/lookup",
      r#"{"name":"Alice","birthdate":"900101"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    call(store.clone(), "POST", "/admin/match", "").await;

    let (status, _) = call(
      store.clone(),
      "POST",
      "/lookup",
      r#"{"name":"Alice","birthdate":"999999"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
      store.clone(),
      "POST",
      "/lookup",
      r#"{"name":"Mallory","birthdate":"900101"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(store, "POST", "/lookup", r#"{"name":"Alice"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn whitespace_only_name_is_not_found() {
    let store = make_store().await;
    upload_and_match(store.clone()).await;
    let (status, _) = call(
      store,
      "POST",
      "/lookup",
      r#"{"name":"   ","birthdate":"900101"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn upload_accepts_integral_float_tables() {
    let store = make_store().await;
    let roster = r#"[
      {"table": 1.0, "name": "Alice", "email": "a@x.com", "birthdate": "900101"},
      {"table": 1, "name": "Bob", "email": "b@x.com", "birthdate": "900202"}
    ]"#;
    let (status, _) = call(store.clone(), "POST", "/admin/upload", roster).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(store.clone(), "POST", "/admin/match", "").await;
    assert_eq!(status, StatusCode::OK);
    let (_, bytes) = call(store, "GET", "/admin/results", "").await;
    let matches: Vec<Match> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.table == 1));
  }

  // ── Storage failures ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn corrupt_snapshot_surfaces_as_500() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path()));
    let (status, _) = call(store.clone(), "POST", "/admin/upload", &alice_and_bob()).await;
    assert_eq!(status, StatusCode::OK);
    std::fs::write(store.path_of(Collection::Matches), "[{ not json").unwrap();

    let (status, bytes) = call(store.clone(), "GET", "/admin/results", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!error_message(&bytes).is_empty());

    let (status, bytes) = call(
      store,
      "POST",
      "/lookup",
      r#"{"name":"Alice","birthdate":"900101"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!error_message(&bytes).is_empty());
  }
}
