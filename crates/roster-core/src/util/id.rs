//! Random identifiers for display and client-side keys.

use rand_core::{OsRng, RngCore};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A random alphanumeric string of `len` characters.
pub fn generate_id(len: usize) -> String {
  (0..len)
    .map(|_| {
      let idx = OsRng.next_u32() as usize % ALPHABET.len();
      ALPHABET[idx] as char
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn length_and_alphabet() {
    let id = generate_id(8);
    assert_eq!(id.len(), 8);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(generate_id(0).is_empty());
  }

  #[test]
  fn ids_differ() {
    assert_ne!(generate_id(32), generate_id(32));
  }
}
