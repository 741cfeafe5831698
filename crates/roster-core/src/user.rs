//! User: the one entity kind the directory manages.
//!
//! Identifiers are plain integers. Locally-created users get a
//! timestamp-derived id (see [`crate::Roster::next_id`]); the mock server
//! assigns its own on `POST /users`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable, unique identifier of a [`User`] within a collection.
pub type UserId = i64;

/// Well-known role labels. The role field itself is free-form.
pub mod roles {
  pub const ADMIN: &str = "admin";
  pub const USER: &str = "user";
  pub const EDITOR: &str = "editor";
}

/// A user record as shown in the directory and exchanged on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:         UserId,
  pub name:       String,
  pub email:      String,
  pub role:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

impl User {
  /// Build a user without timestamps.
  pub fn new(
    id: UserId,
    name: impl Into<String>,
    email: impl Into<String>,
    role: impl Into<String>,
  ) -> Self {
    Self {
      id,
      name: name.into(),
      email: email.into(),
      role: role.into(),
      created_at: None,
      updated_at: None,
    }
  }

  /// Apply every field present in `patch`. The identifier never changes.
  pub fn apply(&mut self, patch: &UserPatch) {
    if let Some(name) = &patch.name {
      self.name = name.clone();
    }
    if let Some(email) = &patch.email {
      self.email = email.clone();
    }
    if let Some(role) = &patch.role {
      self.role = role.clone();
    }
  }
}

/// Payload for creating a user; the identifier is assigned by the owner of
/// the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
  pub name:  String,
  pub email: String,
  pub role:  String,
}

impl NewUser {
  pub fn into_user(self, id: UserId) -> User {
    User::new(id, self.name, self.email, self.role)
  }
}

/// Partial update. Absent fields are left untouched and omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:  Option<String>,
}

impl UserPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.role.is_none()
  }
}
