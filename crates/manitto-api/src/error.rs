//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<manitto_core::Error> for ApiError {
  fn from(e: manitto_core::Error) -> Self {
    use manitto_core::Error as E;
    match e {
      E::Validation(m) | E::State(m) => ApiError::BadRequest(m),
      E::NotFound(m) => ApiError::NotFound(m),
      E::Auth(m) => ApiError::Forbidden(m),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
