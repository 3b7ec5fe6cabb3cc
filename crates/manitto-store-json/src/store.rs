//! [`JsonFileStore`] — the flat-file implementation of [`RecordStore`].

use std::{
  io::{ErrorKind, Write as _},
  path::{Path, PathBuf},
};

use manitto_core::{Match, Participant, RecordStore, store::Collection};
use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::{Error, Result};

/// A record store that keeps each collection in its own JSON file.
///
/// The directory is created on first write. A missing file reads as an empty
/// collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  data_dir: PathBuf,
}

impl JsonFileStore {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    Self {
      data_dir: data_dir.into(),
    }
  }

  pub fn data_dir(&self) -> &Path { &self.data_dir }

  /// Path of the snapshot file for `collection`, e.g. `data/matches.json`.
  pub fn path_of(&self, collection: Collection) -> PathBuf {
    self.data_dir.join(format!("{collection}.json"))
  }

  async fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
    let path = self.path_of(collection);
    let bytes = match fs::read(&path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => return Err(Error::Io { path, source }),
    };
    serde_json::from_slice(&bytes).map_err(|source| Error::Json { path, source })
  }

  /// Serialise `records` and move them into place.
  ///
  /// Each call writes to its own temporary file in the data directory and
  /// persists it over the target, so readers never observe a half-written
  /// array and concurrent writers simply race for the final rename. The
  /// temporary file is removed if anything fails before the rename.
  async fn write<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
    let path = self.path_of(collection);
    let bytes = serde_json::to_vec_pretty(records).map_err(|source| Error::Json {
      path: path.clone(),
      source,
    })?;

    let data_dir = self.data_dir.clone();
    tokio::task::spawn_blocking(move || write_atomic(&data_dir, &path, &bytes)).await?
  }
}

/// Write `bytes` to `path` through a uniquely named temporary file in `dir`.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
  std::fs::create_dir_all(dir).map_err(io_error(dir))?;

  let mut temp_file = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
  temp_file.write_all(bytes).map_err(io_error(temp_file.path()))?;
  temp_file
    .persist(path)
    .map_err(|e| Error::Io {
      path:   path.to_path_buf(),
      source: e.error,
    })?;
  Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + use<> {
  let path = path.to_path_buf();
  move |source| Error::Io { path, source }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for JsonFileStore {
  type Error = Error;

  async fn load_participants(&self) -> Result<Vec<Participant>> {
    let records: Vec<Participant> = self.read(Collection::Participants).await?;
    Ok(records.into_iter().map(Participant::normalized).collect())
  }

  async fn save_participants(&self, participants: &[Participant]) -> Result<()> {
    self.write(Collection::Participants, participants).await?;
    tracing::debug!(count = participants.len(), "wrote participant snapshot");
    Ok(())
  }

  async fn load_matches(&self) -> Result<Vec<Match>> {
    let records: Vec<Match> = self.read(Collection::Matches).await?;
    Ok(records.into_iter().map(Match::normalized).collect())
  }

  async fn save_matches(&self, matches: &[Match]) -> Result<()> {
    self.write(Collection::Matches, matches).await?;
    tracing::debug!(count = matches.len(), "wrote match snapshot");
    Ok(())
  }
}
