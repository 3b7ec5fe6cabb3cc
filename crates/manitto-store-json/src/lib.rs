//! Flat-file backend for the Manitto record store.
//!
//! The data directory holds `participants.json` and `matches.json`, each a
//! pretty-printed JSON array of records. Files are overwritten wholesale on
//! every save.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonFileStore;
