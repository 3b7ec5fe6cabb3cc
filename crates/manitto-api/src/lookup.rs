//! Handler for `POST /lookup`.
//!
//! Body: `{"name": "...", "birthdate": "..."}`. Responds with the caller's
//! [`LookupResult`]; 403 on a birthdate mismatch, 404 for an unknown name, and
//! 400 before matching has been run.

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use manitto_core::{
  RecordStore,
  lookup::{LookupResult, lookup},
};

use crate::{
  body::{decode_credentials, parse_json},
  error::ApiError,
};

/// `POST /lookup`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<LookupResult>, ApiError>
where
  S: RecordStore,
{
  let (name, birthdate) = decode_credentials(&parse_json(&body)?)?;

  let participants = store
    .load_participants()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let matches = store
    .load_matches()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match lookup(&name, &birthdate, &participants, &matches) {
    Ok(result) => {
      tracing::info!(name = %result.your_name, table = result.table, "lookup served");
      Ok(Json(result))
    }
    Err(e) => {
      // Never log the submitted birthdate.
      tracing::warn!(name = %name.trim(), reason = e.message(), "lookup rejected");
      Err(e.into())
    }
  }
}
