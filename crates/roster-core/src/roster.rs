//! [`Roster`]: the in-memory list/detail selection controller.
//!
//! Holds the ordered user collection shown by a front-end and an optional
//! selection pointing into it by identifier. No I/O happens here.
//!
//! Policies:
//! - Identifier uniqueness is the caller's job. Duplicates are tolerated and
//!   lookups return the first match.
//! - Selection is validated lazily. [`Roster::select`] accepts any id;
//!   [`Roster::selected`] treats an id that is no longer in the collection as
//!   "nothing selected".

use std::collections::BTreeMap;

use chrono::Utc;

use crate::user::{User, UserId};

// ─── Selection ────────────────────────────────────────────────────────────────

/// Weak, by-id reference to the user currently shown in the detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
  #[default]
  None,
  Selected(UserId),
}

impl Selection {
  pub fn id(self) -> Option<UserId> {
    match self {
      Selection::None => None,
      Selection::Selected(id) => Some(id),
    }
  }

  pub fn is(self, id: UserId) -> bool {
    self == Selection::Selected(id)
  }
}

impl From<Option<UserId>> for Selection {
  fn from(id: Option<UserId>) -> Self {
    id.map_or(Selection::None, Selection::Selected)
  }
}

// ─── Roster ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Roster {
  users:     Vec<User>,
  selection: Selection,
}

impl Roster {
  pub fn new(users: Vec<User>) -> Self {
    Self { users, selection: Selection::None }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn users(&self) -> &[User] {
    &self.users
  }

  /// First user with `id`, if any.
  pub fn get(&self, id: UserId) -> Option<&User> {
    self.users.iter().find(|u| u.id == id)
  }

  pub fn position(&self, id: UserId) -> Option<usize> {
    self.users.iter().position(|u| u.id == id)
  }

  /// The raw selection, which may dangle.
  pub fn selection(&self) -> Selection {
    self.selection
  }

  /// The selected user, or `None` when nothing is selected or the selected
  /// id is no longer present.
  pub fn selected(&self) -> Option<&User> {
    self.selection.id().and_then(|id| self.get(id))
  }

  pub fn count(&self) -> usize {
    self.users.len()
  }

  pub fn is_empty(&self) -> bool {
    self.users.is_empty()
  }

  pub fn count_by_role(&self, role: &str) -> usize {
    self.users.iter().filter(|u| u.role == role).count()
  }

  /// Users per role label. Values always sum to [`Roster::count`].
  pub fn role_counts(&self) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for user in &self.users {
      *counts.entry(user.role.clone()).or_insert(0) += 1;
    }
    counts
  }

  /// A fresh timestamp-derived id, bumped past the current maximum so it
  /// never collides with an existing entry.
  pub fn next_id(&self) -> UserId {
    let now = Utc::now().timestamp_millis();
    match self.users.iter().map(|u| u.id).max() {
      Some(max) if max >= now => max.checked_add(1).unwrap_or_else(|| {
        // Past the top of the range: take the highest id still free.
        (now..max)
          .rev()
          .find(|id| self.get(*id).is_none())
          .unwrap_or(now)
      }),
      _ => now,
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Append `user` to the end of the collection.
  pub fn add(&mut self, user: User) {
    self.users.push(user);
  }

  /// Insert `user` at `index`, clamped to the collection length.
  pub fn insert_at(&mut self, index: usize, user: User) {
    let index = index.min(self.users.len());
    self.users.insert(index, user);
  }

  /// Remove the first user with `id`, returning it with its former index.
  /// Clears the selection if it pointed at `id`. Absent ids are a no-op.
  pub fn remove(&mut self, id: UserId) -> Option<(usize, User)> {
    let index = self.position(id)?;
    let user = self.users.remove(index);
    if self.selection.is(id) {
      self.selection = Selection::None;
    }
    Some((index, user))
  }

  /// Swap the first user with `id` for `user`, keeping its position. The
  /// selection follows the entry if the id changes. Returns `false` if `id`
  /// is absent.
  pub fn replace(&mut self, id: UserId, user: User) -> bool {
    let Some(index) = self.position(id) else {
      return false;
    };
    if self.selection.is(id) {
      self.selection = Selection::Selected(user.id);
    }
    self.users[index] = user;
    true
  }

  /// Replace the whole collection. The selection survives only if its id is
  /// still present.
  pub fn replace_all(&mut self, users: Vec<User>) {
    self.users = users;
    if let Some(id) = self.selection.id()
      && self.get(id).is_none()
    {
      self.selection = Selection::None;
    }
  }

  pub fn select(&mut self, selection: impl Into<Selection>) {
    self.selection = selection.into();
  }

  pub fn clear_selection(&mut self) {
    self.selection = Selection::None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{fixtures::demo_users, user::roles};

  fn seeded() -> Roster {
    Roster::new(demo_users())
  }

  #[test]
  fn add_then_remove_selected_scenario() {
    let mut roster = seeded();
    roster.add(User::new(4, "Zhao Liu", "zhaoliu@example.com", roles::USER));

    assert_eq!(roster.count(), 4);
    assert_eq!(roster.count_by_role(roles::USER), 2);
    assert_eq!(roster.count_by_role(roles::ADMIN), 1);

    roster.select(Selection::Selected(2));
    let removed = roster.remove(2);
    assert_eq!(removed.map(|(i, u)| (i, u.id)), Some((1, 2)));
    assert_eq!(roster.selection(), Selection::None);
    assert_eq!(roster.count(), 3);
  }

  #[test]
  fn removing_absent_id_changes_nothing() {
    let mut roster = seeded();
    roster.select(Selection::Selected(3));

    assert!(roster.remove(99).is_none());
    assert_eq!(roster.users(), demo_users().as_slice());
    assert_eq!(roster.selection(), Selection::Selected(3));
  }

  #[test]
  fn removing_other_id_keeps_selection() {
    let mut roster = seeded();
    roster.select(Some(3));
    roster.remove(1);
    assert_eq!(roster.selection(), Selection::Selected(3));
    assert_eq!(roster.selected().map(|u| u.id), Some(3));
  }

  #[test]
  fn dangling_selection_reads_as_none() {
    let mut roster = seeded();
    roster.select(Selection::Selected(42));
    assert_eq!(roster.selection(), Selection::Selected(42));
    assert!(roster.selected().is_none());

    roster.add(User::new(42, "Late", "late@example.com", roles::USER));
    assert_eq!(roster.selected().map(|u| u.name.as_str()), Some("Late"));
  }

  #[test]
  fn duplicate_ids_resolve_to_first_match() {
    let mut roster = Roster::default();
    roster.add(User::new(5, "First", "a@example.com", roles::USER));
    roster.add(User::new(5, "Second", "b@example.com", roles::USER));

    assert_eq!(roster.get(5).map(|u| u.name.as_str()), Some("First"));
    roster.remove(5);
    assert_eq!(roster.get(5).map(|u| u.name.as_str()), Some("Second"));
  }

  #[test]
  fn role_counts_sum_to_total() {
    let mut roster = seeded();
    roster.add(User::new(4, "D", "d@example.com", "guest"));
    roster.add(User::new(5, "E", "e@example.com", roles::USER));

    let counts = roster.role_counts();
    assert_eq!(counts.values().sum::<usize>(), roster.count());
    assert_eq!(counts.get("guest"), Some(&1));
    assert_eq!(counts.get(roles::USER), Some(&2));
  }

  #[test]
  fn replace_all_drops_selection_of_missing_id() {
    let mut roster = seeded();
    roster.select(Some(2));
    roster.replace_all(vec![User::new(1, "A", "a@example.com", roles::ADMIN)]);
    assert_eq!(roster.selection(), Selection::None);

    roster.select(Some(1));
    roster.replace_all(demo_users());
    assert_eq!(roster.selection(), Selection::Selected(1));
  }

  #[test]
  fn replace_moves_selection_to_new_id() {
    let mut roster = seeded();
    roster.select(Some(3));
    assert!(roster.replace(3, User::new(30, "Wang Wu", "wangwu@example.com", roles::EDITOR)));
    assert_eq!(roster.selection(), Selection::Selected(30));
    assert_eq!(roster.position(30), Some(2));
    assert!(!roster.replace(99, User::new(1, "x", "x", "x")));
  }

  #[test]
  fn insert_at_restores_original_position() {
    let mut roster = seeded();
    let (index, user) = roster.remove(2).unwrap();
    roster.insert_at(index, user);
    assert_eq!(roster.users(), demo_users().as_slice());

    roster.insert_at(100, User::new(9, "End", "end@example.com", roles::USER));
    assert_eq!(roster.users().last().map(|u| u.id), Some(9));
  }

  #[test]
  fn next_id_is_unique_even_with_future_ids() {
    let mut roster = Roster::default();
    let first = roster.next_id();
    assert!(first > 0);

    roster.add(User::new(i64::MAX - 1, "Far", "far@example.com", roles::USER));
    assert_eq!(roster.next_id(), i64::MAX);

    roster.add(User::new(i64::MAX, "Edge", "edge@example.com", roles::USER));
    let id = roster.next_id();
    assert_eq!(id, i64::MAX - 2);
    assert!(roster.get(id).is_none());
  }
}
