//! SQLite backend for the Manitto record store.
//!
//! Each collection is one JSON document in a key-value table. Wraps
//! [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
