//! Handlers for `/admin` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/upload` | Body: array of `{table,name,email,birthdate}`; replaces the roster and clears matches |
//! | `POST` | `/admin/match` | Body: optional `{"seed": <int>}`; replaces matches |
//! | `GET`  | `/admin/results` | Current match snapshot |

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use manitto_core::{Error, Match, RecordStore, matching::generate_matches_seeded};
use serde::{Deserialize, Serialize};

use crate::{
  body::{decode_roster, decode_seed, parse_json},
  error::ApiError,
};

/// Acknowledgement returned by the mutating admin endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminResponse {
  pub message: String,
  /// Participants stored, or matches generated.
  pub count:   usize,
}

// ─── Upload ───────────────────────────────────────────────────────────────────

/// `POST /admin/upload`
pub async fn upload<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<AdminResponse>, ApiError>
where
  S: RecordStore,
{
  let participants = decode_roster(&parse_json(&body)?)?;

  store
    .replace_roster(&participants)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(count = participants.len(), "participant roster replaced");
  Ok(Json(AdminResponse {
    message: "upload complete".into(),
    count:   participants.len(),
  }))
}

// ─── Match ────────────────────────────────────────────────────────────────────

/// `POST /admin/match`
///
/// Nothing is written unless every table can be matched.
pub async fn run_match<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<AdminResponse>, ApiError>
where
  S: RecordStore,
{
  let seed = decode_seed(&body)?;

  let participants = store
    .load_participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if participants.is_empty() {
    return Err(
      Error::State("no participants uploaded yet; upload a roster first".into()).into(),
    );
  }

  let matches = generate_matches_seeded(&participants, seed)?;

  store
    .save_matches(&matches)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(count = matches.len(), seeded = seed.is_some(), "matching complete");
  Ok(Json(AdminResponse {
    message: "matching complete".into(),
    count:   matches.len(),
  }))
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// `GET /admin/results`
pub async fn results<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Match>>, ApiError>
where
  S: RecordStore,
{
  let matches = store
    .load_matches()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(matches))
}
