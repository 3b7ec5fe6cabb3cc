//! Canonical forms for the free-text fields compared during lookup.
//!
//! All three functions are idempotent: normalizing an already-normalized
//! value returns it unchanged.

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

/// Trim surrounding whitespace; case is preserved.
pub fn normalize_name(name: &str) -> String { name.trim().to_owned() }

/// Trim surrounding whitespace.
///
/// The birthdate is an opaque shared secret (`YYMMDD`, `YYYY-MM-DD`, or
/// whatever the roster uses). It is never parsed as a date.
pub fn normalize_birthdate(birthdate: &str) -> String {
  birthdate.trim().to_owned()
}
