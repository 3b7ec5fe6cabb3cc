//! The matching engine.
//!
//! Participants are partitioned by table and each table is shuffled and closed
//! into a single gift-giving cycle: the member at shuffled position `i` gives
//! to the member at position `i + 1`, wrapping around. A two-member table
//! therefore yields the reciprocal pair `a → b`, `b → a`.
//!
//! A single cycle is always a derangement, so no rejection sampling is needed.
//! It does not sample uniformly from every derangement (a table of four never
//! splits into two swapped pairs), and that output distribution is kept as is.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{Error, Match, Participant, Result};

/// Smallest table that can be matched.
pub const MIN_TABLE_SIZE: usize = 2;

/// Group participants by table.
///
/// Tables appear in order of their first participant and members keep their
/// roster order, so a seeded run is reproducible.
pub fn group_by_table(participants: &[Participant]) -> Vec<(i64, Vec<&Participant>)> {
  let mut groups: Vec<(i64, Vec<&Participant>)> = Vec::new();
  for p in participants {
    match groups.iter_mut().find(|(table, _)| *table == p.table) {
      Some((_, members)) => members.push(p),
      None => groups.push((p.table, vec![p])),
    }
  }
  groups
}

/// Produce one outgoing match per participant, drawing from `rng`.
///
/// The same generator is consumed table after table, so a seeded generator
/// yields identical output for identical input. Fails without producing any
/// matches if a table has fewer than [`MIN_TABLE_SIZE`] members.
pub fn generate_matches<R>(participants: &[Participant], rng: &mut R) -> Result<Vec<Match>>
where
  R: Rng + ?Sized,
{
  let groups = group_by_table(participants);

  if let Some((table, _)) = groups
    .iter()
    .find(|(_, members)| members.len() < MIN_TABLE_SIZE)
  {
    return Err(Error::Validation(format!(
      "table {table} has fewer than {MIN_TABLE_SIZE} participants"
    )));
  }

  let mut matches = Vec::with_capacity(participants.len());
  for (table, mut members) in groups {
    members.shuffle(rng);
    let size = members.len();
    for (i, giver) in members.iter().enumerate() {
      let recipient = members[(i + 1) % size];
      matches.push(Match::between(table, giver, recipient));
    }
  }

  Ok(matches)
}

/// [`generate_matches`] with a fresh generator for this call only.
///
/// With a seed the output is deterministic; without one the generator is
/// seeded from OS entropy.
pub fn generate_matches_seeded(
  participants: &[Participant],
  seed: Option<u64>,
) -> Result<Vec<Match>> {
  let mut rng = match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };
  generate_matches(participants, &mut rng)
}
