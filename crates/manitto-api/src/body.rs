//! Lenient decoding of request bodies.
//!
//! Bodies are parsed from raw bytes rather than through `axum::Json` so that a
//! missing `Content-Type` header is accepted and every decoding failure comes
//! back as the API's own `{"error": ...}` shape.
//!
//! Scalar fields are forgiving about their JSON type: a table number may be an
//! integral float like `1.0`, a table number or seed may arrive as a string
//! holding an integer, and text fields may arrive as numbers (a birthdate
//! typed as `900101` in a spreadsheet export).

use manitto_core::Participant;
use serde_json::Value;

use crate::error::ApiError;

/// Parse `body` as JSON, rejecting anything unparseable.
pub fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
  serde_json::from_slice(body)
    .map_err(|e| ApiError::BadRequest(format!("request body is not valid JSON: {e}")))
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// Decode an upload payload into a normalized roster.
pub fn decode_roster(payload: &Value) -> Result<Vec<Participant>, ApiError> {
  let rows = payload
    .as_array()
    .ok_or_else(|| ApiError::BadRequest("expected a JSON array of participants".into()))?;

  rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      decode_participant(row)
        .map_err(|e| ApiError::BadRequest(format!("malformed row {i}: {e}")))
    })
    .collect()
}

fn decode_participant(row: &Value) -> Result<Participant, String> {
  let table = integer(field(row, "table")?).ok_or("`table` must be an integer")?;
  let name = text(field(row, "name")?).ok_or("`name` must be text")?;
  let email = text(field(row, "email")?).ok_or("`email` must be text")?;
  let birthdate = text(field(row, "birthdate")?).ok_or("`birthdate` must be text")?;
  Ok(Participant::new(table, name, email, birthdate))
}

fn field<'a>(row: &'a Value, key: &str) -> Result<&'a Value, String> {
  row.get(key).ok_or_else(|| format!("missing field `{key}`"))
}

// ─── Match ───────────────────────────────────────────────────────────────────

/// Extract the optional `seed` from a match request.
///
/// An empty or unparseable body, or one that is not an object, counts as no
/// seed at all. A present seed must be numeric; negative values wrap into the
/// unsigned seed space.
pub fn decode_seed(body: &[u8]) -> Result<Option<u64>, ApiError> {
  let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
    return Ok(None);
  };
  let invalid = || ApiError::BadRequest("seed must be a number".into());

  match map.get("seed") {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => n
      .as_u64()
      .or_else(|| n.as_i64().map(|i| i as u64))
      .or_else(|| n.as_f64().map(|f| f.trunc() as i64 as u64))
      .map(Some)
      .ok_or_else(invalid),
    Some(Value::String(s)) => s
      .trim()
      .parse::<i64>()
      .map(|i| Some(i as u64))
      .map_err(|_| invalid()),
    Some(_) => Err(invalid()),
  }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// The `name` and `birthdate` of a lookup request, both required and
/// non-empty.
pub fn decode_credentials(payload: &Value) -> Result<(String, String), ApiError> {
  let required = || ApiError::BadRequest("name and birthdate are required".into());

  let name = payload.get("name").and_then(text).ok_or_else(required)?;
  let birthdate = payload.get("birthdate").and_then(text).ok_or_else(required)?;
  if name.is_empty() || birthdate.is_empty() {
    return Err(required());
  }
  Ok((name, birthdate))
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

/// An integer, an integral float such as `1.0`, or a string holding an
/// integer.
fn integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(n) => n.as_i64().or_else(|| {
      n.as_f64()
        .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(f))
        .map(|f| f as i64)
    }),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

fn text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn roster_accepts_numeric_strings_and_numbers() {
    let payload = json!([
      { "table": "2", "name": " Alice ", "email": "A@X.COM", "birthdate": 900101 },
      { "table": 2, "name": "Bob", "email": "b@x.com", "birthdate": "1990-02-02" },
    ]);
    let roster = decode_roster(&payload).unwrap();
    assert_eq!(roster[0], Participant::new(2, "Alice", "a@x.com", "900101"));
    assert_eq!(roster[1].birthdate, "1990-02-02");
  }

  #[test]
  fn integral_float_table_is_accepted() {
    let payload = json!([
      { "table": 1.0, "name": "Alice", "email": "a@x.com", "birthdate": "900101" },
    ]);
    assert_eq!(decode_roster(&payload).unwrap()[0].table, 1);

    let fractional = json!([
      { "table": 1.5, "name": "Alice", "email": "a@x.com", "birthdate": "900101" },
    ]);
    assert!(decode_roster(&fractional).is_err());
  }

  #[test]
  fn roster_must_be_an_array() {
    let err = decode_roster(&json!({ "table": 1 })).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }

  #[test]
  fn malformed_row_names_its_index() {
    let payload = json!([
      { "table": 1, "name": "Alice", "email": "a@x.com", "birthdate": "900101" },
      { "table": "one", "name": "Bob", "email": "b@x.com", "birthdate": "900202" },
    ]);
    match decode_roster(&payload).unwrap_err() {
      ApiError::BadRequest(m) => assert!(m.starts_with("malformed row 1"), "{m}"),
      other => panic!("unexpected error: {other:?}"),
    }

    let missing = json!([{ "table": 1, "name": "Alice", "email": "a@x.com" }]);
    match decode_roster(&missing).unwrap_err() {
      ApiError::BadRequest(m) => assert!(m.contains("birthdate"), "{m}"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn seed_forms() {
    assert_eq!(decode_seed(b"").unwrap(), None);
    assert_eq!(decode_seed(b"not json").unwrap(), None);
    assert_eq!(decode_seed(b"{}").unwrap(), None);
    assert_eq!(decode_seed(br#"{"seed": null}"#).unwrap(), None);
    assert_eq!(decode_seed(br#"{"seed": 42}"#).unwrap(), Some(42));
    assert_eq!(decode_seed(br#"{"seed": " 42 "}"#).unwrap(), Some(42));
    assert_eq!(decode_seed(br#"{"seed": -1}"#).unwrap(), Some(u64::MAX));
    assert_eq!(decode_seed(br#"{"seed": 7.9}"#).unwrap(), Some(7));
  }

  #[test]
  fn non_numeric_seed_is_rejected() {
    assert!(decode_seed(br#"{"seed": "abc"}"#).is_err());
    assert!(decode_seed(br#"{"seed": [1]}"#).is_err());
    assert!(decode_seed(br#"{"seed": true}"#).is_err());
  }

  #[test]
  fn credentials_are_required() {
    assert!(decode_credentials(&json!({ "name": "Alice" })).is_err());
    assert!(decode_credentials(&json!({ "name": "", "birthdate": "900101" })).is_err());
    assert_eq!(
      decode_credentials(&json!({ "name": "Alice", "birthdate": 900101 })).unwrap(),
      ("Alice".to_owned(), "900101".to_owned())
    );
  }
}
