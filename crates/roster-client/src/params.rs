//! Query-string helpers and an in-process navigation history.
//!
//! [`Location`] is process-wide mutable state in spirit: whoever owns it owns
//! the current address. Keep a single owner.

use std::collections::BTreeMap;

use reqwest::Url;

/// Query parameters of `url` as a map. A repeated key keeps its last value.
pub fn get_url_params(url: &Url) -> BTreeMap<String, String> {
  url.query_pairs().into_owned().collect()
}

/// Set each of `params` on `url`. An existing key has its first occurrence
/// replaced and any repeats dropped; a new key is appended. Other parameters
/// keep their order.
pub fn set_url_params(url: &mut Url, params: &BTreeMap<String, String>) {
  let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
  for (key, value) in params {
    match pairs.iter().position(|(k, _)| k == key) {
      Some(first) => {
        pairs[first].1 = value.clone();
        let mut seen = false;
        pairs.retain(|(k, _)| {
          if k != key {
            return true;
          }
          let keep = !seen;
          seen = true;
          keep
        });
      }
      None => pairs.push((key.clone(), value.clone())),
    }
  }

  if pairs.is_empty() {
    url.set_query(None);
  } else {
    url.query_pairs_mut().clear().extend_pairs(pairs);
  }
}

// ─── Location ─────────────────────────────────────────────────────────────────

/// The current address plus the addresses it replaced, newest last.
#[derive(Debug, Clone)]
pub struct Location {
  current: Url,
  history: Vec<Url>,
}

impl Location {
  pub fn new(url: Url) -> Self {
    Self { current: url, history: Vec::new() }
  }

  pub fn current(&self) -> &Url {
    &self.current
  }

  pub fn params(&self) -> BTreeMap<String, String> {
    get_url_params(&self.current)
  }

  /// Apply `params` to the current address and record the previous one.
  /// Nothing is fetched.
  pub fn push_params(&mut self, params: &BTreeMap<String, String>) {
    let mut next = self.current.clone();
    set_url_params(&mut next, params);
    let previous = std::mem::replace(&mut self.current, next);
    self.history.push(previous);
  }

  /// Return to the previous address. `false` if there is none.
  pub fn back(&mut self) -> bool {
    match self.history.pop() {
      Some(previous) => {
        self.current = previous;
        true
      }
      None => false,
    }
  }

  pub fn history_len(&self) -> usize {
    self.history.len()
  }
}
