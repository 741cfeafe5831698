//! String case conversion and truncation.

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => {
      let rest = chars.as_str().to_lowercase();
      first.to_uppercase().chain(rest.chars()).collect()
    }
    None => String::new(),
  }
}

/// `userName` → `user_name`. Only ASCII upper-case letters split words.
pub fn camel_to_snake(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 4);
  for ch in s.chars() {
    if ch.is_ascii_uppercase() {
      out.push('_');
      out.push(ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

/// `user_name` → `userName`. An underscore is dropped only when followed by
/// an ASCII lower-case letter.
pub fn snake_to_camel(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars().peekable();
  while let Some(ch) = chars.next() {
    match (ch, chars.peek()) {
      ('_', Some(next)) if next.is_ascii_lowercase() => {
        out.push(next.to_ascii_uppercase());
        chars.next();
      }
      _ => out.push(ch),
    }
  }
  out
}

/// Keep at most `len` characters of `s`, appending `suffix` if anything was
/// cut.
pub fn truncate(s: &str, len: usize, suffix: &str) -> String {
  match s.char_indices().nth(len) {
    None => s.to_string(),
    Some((byte_idx, _)) => format!("{}{suffix}", &s[..byte_idx]),
  }
}
