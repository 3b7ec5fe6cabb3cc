//! The lookup service: an employee authenticates with name + birthdate and
//! learns who they give a gift to.
//!
//! Names are matched after normalization and the first roster entry wins;
//! duplicate names are not disambiguated. A wrong birthdate is reported
//! separately from an unknown name.
//!
//! Only literally empty credentials are rejected up front. A whitespace-only
//! name normalizes to `""` and is then simply not found in the roster.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Match, Participant, Result,
  normalize::{normalize_birthdate, normalize_name},
};

/// What a successful lookup reveals to the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
  /// The participant's own name as stored in the match set.
  pub your_name:     String,
  pub table:         i64,
  pub manitti_name:  String,
  pub manitti_email: String,
  /// The gift guide, addressed with the manitti's name.
  pub message:       String,
}

/// Render the fixed gift-guide message for `manitti_name`.
pub fn gift_guide_message(manitti_name: &str) -> String {
  format!(
    "Your manitti is {manitti_name}.\n\n\
     Think of your manitti and prepare a gift chosen with care and a little flair!\n\
     Never reveal to your manitti that you are their manitto. It's a secret~ 🤫\n\
     [Gift guide]\n\
     Budget: 15,000 to 20,000 KRW\n\
     ❌ Please avoid low-effort gifts such as cash or gift cards ❌\n\
     It's a small gift, but we hope it carries some warmth to a colleague you \
     spent the year with ✨\n\
     Anything that makes the recipient smile is OK!"
  )
}

/// Authenticate `name` + `birthdate` against the roster and return the
/// participant's assignment.
pub fn lookup(
  name: &str,
  birthdate: &str,
  participants: &[Participant],
  matches: &[Match],
) -> Result<LookupResult> {
  if name.is_empty() || birthdate.is_empty() {
    return Err(Error::Validation("name and birthdate are required".into()));
  }
  let name = normalize_name(name);
  let birthdate = normalize_birthdate(birthdate);

  let participant = participants
    .iter()
    .find(|p| normalize_name(&p.name) == name)
    .ok_or_else(|| Error::NotFound("name not in roster".into()))?;

  if normalize_birthdate(&participant.birthdate) != birthdate {
    return Err(Error::Auth("birthdate does not match".into()));
  }

  if matches.is_empty() {
    return Err(Error::State("matching has not been run yet".into()));
  }

  let assignment = matches
    .iter()
    .find(|m| normalize_name(&m.manitto_name) == name)
    .ok_or_else(|| Error::NotFound("no match found for this name".into()))?;

  Ok(LookupResult {
    your_name:     assignment.manitto_name.clone(),
    table:         assignment.table,
    manitti_name:  assignment.manitti_name.clone(),
    manitti_email: assignment.manitti_email.clone(),
    message:       gift_guide_message(&assignment.manitti_name),
  })
}
