//! Request and response shapes shared by the client and the mock server.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// One page of a larger listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
  pub data:        Vec<T>,
  pub total:       usize,
  pub page:        usize,
  pub limit:       usize,
  pub total_pages: usize,
}

impl<T: Clone> Paginated<T> {
  /// Cut page `page` (1-based) of size `limit` out of `all`.
  pub fn from_slice(all: &[T], page: usize, limit: usize) -> Self {
    let total_pages = if limit == 0 { 0 } else { all.len().div_ceil(limit) };
    Self {
      data: crate::util::collections::paginate(all, page, limit),
      total: all.len(),
      page,
      limit,
      total_pages,
    }
  }
}

/// Generic success/message envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub data:    T,
  pub message: String,
  pub success: bool,
}

// ─── Auth ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
  pub name:     String,
  pub email:    String,
  pub password: String,
}

/// Returned by `login` and `register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
  pub token: String,
  pub user:  User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRefresh {
  pub token: String,
}
