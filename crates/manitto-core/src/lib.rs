//! Core types and logic for the Manitto matching tool.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It holds
//! the record types, the normalization rules that make credential comparison
//! stable, the matching engine, the lookup service, and the [`RecordStore`]
//! abstraction the storage backends implement.

pub mod error;
pub mod lookup;
pub mod matching;
pub mod normalize;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::{Match, Participant};
pub use store::RecordStore;
