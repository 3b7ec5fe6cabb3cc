//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use manitto_core::{Match, Participant, RecordStore, store::Collection};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{decode_matches, decode_participants, encode_snapshot},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Manitto record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch the stored body for `collection`, if any.
  async fn read_body(&self, collection: Collection) -> Result<Option<String>> {
    let key = collection.as_ref().to_owned();

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT body FROM snapshots WHERE collection = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(body)
  }

  /// Replace the stored body for `collection`.
  async fn write_body(&self, collection: Collection, body: String) -> Result<()> {
    let key = collection.as_ref().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snapshots (collection, body) VALUES (?1, ?2)
           ON CONFLICT (collection) DO UPDATE SET body = excluded.body",
          rusqlite::params![key, body],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Participants ──────────────────────────────────────────────────────────

  async fn load_participants(&self) -> Result<Vec<Participant>> {
    let body = self.read_body(Collection::Participants).await?;
    decode_participants(body)
  }

  async fn save_participants(&self, participants: &[Participant]) -> Result<()> {
    let body = encode_snapshot(participants)?;
    self.write_body(Collection::Participants, body).await?;
    tracing::debug!(count = participants.len(), "saved participant snapshot");
    Ok(())
  }

  // ── Matches ───────────────────────────────────────────────────────────────

  async fn load_matches(&self) -> Result<Vec<Match>> {
    let body = self.read_body(Collection::Matches).await?;
    decode_matches(body)
  }

  async fn save_matches(&self, matches: &[Match]) -> Result<()> {
    let body = encode_snapshot(matches)?;
    self.write_body(Collection::Matches, body).await?;
    tracing::debug!(count = matches.len(), "saved match snapshot");
    Ok(())
  }
}
