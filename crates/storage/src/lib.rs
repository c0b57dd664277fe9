//! Storage backends for spelling-practice app state.
//!
//! Exposes the [`repository::StateStore`] key/value contract, an in-memory
//! implementation for tests, and the `SQLite` backend the app runs on.

#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryStore, StateStore, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteStore};
