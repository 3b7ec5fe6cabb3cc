//! SQL schema for the Manitto SQLite store.
//!
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per collection; `body` is the JSON array of the latest snapshot.
CREATE TABLE IF NOT EXISTS snapshots (
    collection  TEXT PRIMARY KEY,   -- 'participants' | 'matches'
    body        TEXT NOT NULL
);

PRAGMA user_version = 1;
";
