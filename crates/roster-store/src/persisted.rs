//! [`Persisted`]: an in-memory value mirrored to one durable slot.

use std::{fmt, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};

use crate::kv::{KvStore, KvStoreExt as _};

/// A value of type `T` kept in sync with the slot at `key`.
///
/// The in-memory value is authoritative. It is read from the slot once, at
/// [`Persisted::load`], and written through on every [`set`](Self::set) or
/// [`update`](Self::update). Durability is best-effort: storage failures are
/// logged and never returned.
///
/// One `Persisted` should own a given key. Two instances on the same key do
/// not see each other's writes and the slot ends up holding whichever wrote
/// last.
pub struct Persisted<T> {
  store: Arc<dyn KvStore>,
  key:   String,
  value: T,
}

impl<T> Persisted<T>
where
  T: Serialize + DeserializeOwned,
{
  /// Read the slot at `key`, falling back to `default` if it is empty or
  /// cannot be decoded.
  pub fn load(store: Arc<dyn KvStore>, key: impl Into<String>, default: T) -> Self {
    let key = key.into();
    let value = store.get_json(&key).unwrap_or_else(|| {
      tracing::debug!(key = %key, "slot empty or unreadable, using default");
      default
    });
    Self { store, key, value }
  }

  pub fn get(&self) -> &T {
    &self.value
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Replace the value, then write it through.
  pub fn set(&mut self, value: T) {
    self.value = value;
    self.flush();
  }

  /// Replace the value with `f(current)`, then write it through.
  pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
    let next = f(&self.value);
    self.set(next);
  }

  /// Write the current value to the slot again. Returns whether it landed.
  pub fn flush(&self) -> bool {
    self.store.set_json(&self.key, &self.value)
  }

  pub fn into_inner(self) -> T {
    self.value
  }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Persisted")
      .field("key", &self.key)
      .field("value", &self.value)
      .finish_non_exhaustive()
  }
}
