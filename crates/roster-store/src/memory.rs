//! [`MemoryKv`]: a process-local slot backend.

use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard},
};

use crate::{Error, KvStore, Result};

/// Slots held in a `HashMap`; gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryKv {
  slots: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
    self.slots.lock().map_err(|_| Error::Poisoned)
  }

  /// Number of occupied slots.
  pub fn len(&self) -> usize {
    self.lock().map(|s| s.len()).unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl KvStore for MemoryKv {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.lock()?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.lock()?.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.lock()?.remove(key);
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    self.lock()?.clear();
    Ok(())
  }
}
