//! Durable key-value slots and the persistence-backed value container.
//!
//! A slot is one string key mapped to the JSON text of a value. Backends
//! implement [`KvStore`]; [`Persisted`] keeps an in-memory value in sync with
//! one slot (read once at load, written through on every change).
//!
//! Access discipline: one owner per key per process. Nothing here coordinates
//! two owners of the same key; the last write wins.

mod kv;
mod memory;
mod persisted;
mod schema;
mod sqlite;

pub mod error;

pub use error::{Error, Result};
pub use kv::{KvStore, KvStoreExt};
pub use memory::MemoryKv;
pub use persisted::Persisted;
pub use sqlite::SqliteKv;

#[cfg(test)]
mod tests;
