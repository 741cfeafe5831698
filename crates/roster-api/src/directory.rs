//! [`Directory`]: the mock server's in-memory data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use roster_core::user::{NewUser, User, UserId, UserPatch};
use uuid::Uuid;

/// Login record for a registered user.
#[derive(Debug, Clone)]
pub struct Account {
  pub user_id:       UserId,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Users, login accounts and open sessions.
#[derive(Debug, Default)]
pub struct Directory {
  users:    Vec<User>,
  next_id:  UserId,
  accounts: HashMap<String, Account>,
  sessions: HashMap<String, UserId>,
}

impl Directory {
  pub fn new() -> Self {
    Self::with_users(Vec::new())
  }

  /// Start from `users`; new ids continue after the largest one.
  pub fn with_users(users: Vec<User>) -> Self {
    let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    Self { users, next_id, ..Default::default() }
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  pub fn users(&self) -> &[User] {
    &self.users
  }

  pub fn get(&self, id: UserId) -> Option<&User> {
    self.users.iter().find(|u| u.id == id)
  }

  /// Store `input` under a fresh id, stamping `created_at`.
  pub fn create(&mut self, input: NewUser, now: DateTime<Utc>) -> User {
    let id = self.next_id.max(1);
    self.next_id = id + 1;
    let mut user = input.into_user(id);
    user.created_at = Some(now);
    self.users.push(user.clone());
    user
  }

  /// Apply `patch` to user `id`, stamping `updated_at`.
  pub fn update(&mut self, id: UserId, patch: &UserPatch, now: DateTime<Utc>) -> Option<User> {
    let user = self.users.iter_mut().find(|u| u.id == id)?;
    user.apply(patch);
    user.updated_at = Some(now);
    Some(user.clone())
  }

  /// Delete user `id` together with its account and sessions.
  pub fn remove(&mut self, id: UserId) -> Option<User> {
    let index = self.users.iter().position(|u| u.id == id)?;
    self.accounts.retain(|_, a| a.user_id != id);
    self.sessions.retain(|_, uid| *uid != id);
    Some(self.users.remove(index))
  }

  // ── Accounts ──────────────────────────────────────────────────────────────

  pub fn account(&self, email: &str) -> Option<&Account> {
    self.accounts.get(email)
  }

  pub fn has_account(&self, email: &str) -> bool {
    self.accounts.contains_key(email)
  }

  pub fn add_account(&mut self, email: impl Into<String>, account: Account) {
    self.accounts.insert(email.into(), account);
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// Issue a fresh bearer token for `user_id`.
  pub fn open_session(&mut self, user_id: UserId) -> String {
    let token = Uuid::new_v4().simple().to_string();
    self.sessions.insert(token.clone(), user_id);
    token
  }

  pub fn session_user(&self, token: &str) -> Option<UserId> {
    self.sessions.get(token).copied()
  }

  /// Revoke `token`. `false` if it was not open.
  pub fn close_session(&mut self, token: &str) -> bool {
    self.sessions.remove(token).is_some()
  }
}
