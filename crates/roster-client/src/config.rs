//! Connection settings.

/// Environment variable holding the API base address.
pub const BASE_URL_ENV: &str = "ROSTER_API_BASE_URL";

/// Used when [`BASE_URL_ENV`] is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Connection settings for the Roster API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  /// Prefix every endpoint path is appended to, e.g.
  /// `http://localhost:3000/api`.
  pub base_url: String,
}

impl ApiConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into() }
  }

  /// Read [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let base_url = lookup(BASE_URL_ENV)
      .filter(|v| !v.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    Self { base_url }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self::new(DEFAULT_BASE_URL)
  }
}
