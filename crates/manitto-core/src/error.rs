//! Error types for `manitto-core`.

use thiserror::Error;

/// Failures raised by the matching engine and the lookup service.
///
/// Every variant carries a human-readable message that is safe to show to the
/// caller; see [`Error::message`].
#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or missing input.
  #[error("validation error: {0}")]
  Validation(String),

  /// An operation invoked out of order, e.g. a lookup before matching.
  #[error("state error: {0}")]
  State(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// The supplied birthdate does not match the roster.
  #[error("authentication failed: {0}")]
  Auth(String),
}

impl Error {
  /// The message without the variant prefix.
  pub fn message(&self) -> &str {
    match self {
      Self::Validation(m) | Self::State(m) | Self::NotFound(m) | Self::Auth(m) => m,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
