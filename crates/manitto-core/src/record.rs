//! The two persisted record types.
//!
//! Both are flat so that a snapshot is simply a JSON array of objects. There is
//! no identifier beyond the participant's name; the roster is replaced
//! wholesale on every upload.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_birthdate, normalize_email, normalize_name};

// ─── Participant ─────────────────────────────────────────────────────────────

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
  /// Group identifier; participants are only matched within their table.
  pub table:     i64,
  pub name:      String,
  /// Trimmed and lowercased.
  pub email:     String,
  /// Trimmed opaque credential.
  pub birthdate: String,
}

impl Participant {
  /// Build a participant, normalizing every free-text field.
  pub fn new(
    table: i64,
    name: impl AsRef<str>,
    email: impl AsRef<str>,
    birthdate: impl AsRef<str>,
  ) -> Self {
    Self {
      table,
      name: normalize_name(name.as_ref()),
      email: normalize_email(email.as_ref()),
      birthdate: normalize_birthdate(birthdate.as_ref()),
    }
  }

  /// Re-apply normalization to a record read back from storage.
  ///
  /// The name is left as stored; lookups normalize it at comparison time.
  pub fn normalized(self) -> Self {
    Self {
      email: normalize_email(&self.email),
      birthdate: normalize_birthdate(&self.birthdate),
      ..self
    }
  }
}

// ─── Match ───────────────────────────────────────────────────────────────────

/// A directed gift assignment: the manitto gives to the manitti.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
  pub table:         i64,
  pub manitto_name:  String,
  pub manitto_email: String,
  pub manitti_name:  String,
  pub manitti_email: String,
}

impl Match {
  /// Pair `giver` with `recipient` inside `table`.
  pub fn between(table: i64, giver: &Participant, recipient: &Participant) -> Self {
    Self {
      table,
      manitto_name: giver.name.clone(),
      manitto_email: giver.email.clone(),
      manitti_name: recipient.name.clone(),
      manitti_email: recipient.email.clone(),
    }
  }

  /// Re-apply email normalization to a record read back from storage.
  pub fn normalized(self) -> Self {
    Self {
      manitto_email: normalize_email(&self.manitto_email),
      manitti_email: normalize_email(&self.manitti_email),
      ..self
    }
  }
}
