//! The [`KvStore`] abstraction and typed JSON helpers on top of it.

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// A string-keyed, string-valued durable store.
///
/// Implementations use interior mutability so a single backend can be shared
/// as `Arc<dyn KvStore>` between several slot owners.
pub trait KvStore: Send + Sync {
  /// Raw text stored at `key`, or `None` if the slot is empty.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Overwrite the slot at `key`.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Empty the slot at `key`. Removing an empty slot is not an error.
  fn remove(&self, key: &str) -> Result<()>;

  /// Empty every slot.
  fn clear(&self) -> Result<()>;
}

/// JSON convenience layer with log-and-continue semantics.
///
/// Neither method ever fails: read problems fall back to `None`, write
/// problems are logged.
pub trait KvStoreExt: KvStore {
  /// Decode the slot at `key` as `T`.
  fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let raw = match self.get(key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        tracing::warn!(key, error = %e, "failed to read slot");
        return None;
      }
    };
    match serde_json::from_str(&raw) {
      Ok(value) => Some(value),
      Err(e) => {
        tracing::warn!(key, error = %e, "failed to decode slot");
        None
      }
    }
  }

  /// Encode `value` and write it to `key`. Returns whether the write landed.
  fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
    let outcome = serde_json::to_string(value)
      .map_err(crate::Error::from)
      .and_then(|raw| self.set(key, &raw));
    match outcome {
      Ok(()) => true,
      Err(e) => {
        tracing::error!(key, error = %e, "failed to write slot");
        false
      }
    }
  }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
