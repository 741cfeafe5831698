//! Format checks for user-entered contact fields.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

// Mainland China mobile numbers.
static PHONE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
  EMAIL.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
  PHONE.is_match(phone)
}
