//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (`manitto-store-json`,
//! `manitto-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use strum::{AsRefStr, Display};

use crate::record::{Match, Participant};

/// The two snapshot collections a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
  Participants,
  Matches,
}

/// Abstraction over a Manitto record store backend.
///
/// Each collection is a full snapshot: a save replaces everything previously
/// stored, and a load returns the latest snapshot, or an empty list when
/// nothing has been saved yet. There is no locking across a load and a later
/// save; concurrent writers race and the last one wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Participants ──────────────────────────────────────────────────────

  fn load_participants(
    &self,
  ) -> impl Future<Output = Result<Vec<Participant>, Self::Error>> + Send + '_;

  fn save_participants<'a>(
    &'a self,
    participants: &'a [Participant],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Matches ───────────────────────────────────────────────────────────

  fn load_matches(
    &self,
  ) -> impl Future<Output = Result<Vec<Match>, Self::Error>> + Send + '_;

  fn save_matches<'a>(
    &'a self,
    matches: &'a [Match],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Composite ─────────────────────────────────────────────────────────

  /// Replace the roster and clear any matches made against the old one.
  fn replace_roster<'a>(
    &'a self,
    participants: &'a [Participant],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
    async move {
      self.save_participants(participants).await?;
      self.save_matches(&[]).await
    }
  }
}
