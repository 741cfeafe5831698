//! [`SqliteKv`]: slots in a single SQLite file.

use std::{
  path::Path,
  sync::{Mutex, MutexGuard},
};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension as _};

use crate::{Error, KvStore, Result, schema::SCHEMA};

/// A slot backend that survives process restarts.
///
/// The connection sits behind a `Mutex` so the backend is `Sync`; it does not
/// serialise logical owners of one key.
pub struct SqliteKv {
  conn: Mutex<Connection>,
}

impl SqliteKv {
  /// Open (or create) the slot database at `path` and run schema
  /// initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open a private in-memory database.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| Error::Poisoned)
  }
}

impl KvStore for SqliteKv {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn()?
      .query_row(
        "SELECT value FROM slots WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    self.conn()?.execute(
      "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                      updated_at = excluded.updated_at",
      rusqlite::params![key, value, updated_at],
    )?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self
      .conn()?
      .execute("DELETE FROM slots WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    self.conn()?.execute("DELETE FROM slots", [])?;
    Ok(())
  }
}
