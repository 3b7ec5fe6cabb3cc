//! Encoding and decoding helpers between record snapshots and the JSON text
//! stored in the `snapshots.body` column.

use manitto_core::{Match, Participant};
use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

pub fn encode_snapshot<T: Serialize>(records: &[T]) -> Result<String> {
  Ok(serde_json::to_string(records)?)
}

/// Decode a stored body; a missing row is an empty snapshot.
fn decode_snapshot<T: DeserializeOwned>(body: Option<String>) -> Result<Vec<T>> {
  match body {
    Some(body) => Ok(serde_json::from_str(&body)?),
    None => Ok(Vec::new()),
  }
}

pub fn decode_participants(body: Option<String>) -> Result<Vec<Participant>> {
  Ok(
    decode_snapshot::<Participant>(body)?
      .into_iter()
      .map(Participant::normalized)
      .collect(),
  )
}

pub fn decode_matches(body: Option<String>) -> Result<Vec<Match>> {
  Ok(
    decode_snapshot::<Match>(body)?
      .into_iter()
      .map(Match::normalized)
      .collect(),
  )
}
