//! Error type for `roster-store`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A previous holder of the backend lock panicked.
  #[error("storage lock poisoned")]
  Poisoned,

  /// For backends outside this crate that cannot reach their storage.
  #[error("storage unavailable: {0}")]
  Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
