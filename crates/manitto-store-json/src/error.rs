//! Error type for `manitto-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed snapshot {path:?}: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("snapshot write task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
