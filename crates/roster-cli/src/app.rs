//! Application state machine and event dispatcher.

use std::{sync::Arc, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use roster_client::{ApiClient, timing::Throttle};
use roster_core::{
  Roster,
  fixtures::demo_users,
  user::{NewUser, User, UserId, roles},
};
use roster_store::{KvStore, Persisted};

/// Slot holding the cached user list.
pub const USERS_KEY: &str = "users";

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the user list; the right pane previews the selection.
  List,
  /// Focus on the selected user's detail pane.
  Detail,
  /// The add-user form is open over the body.
  Form,
}

// ─── Add form ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
  #[default]
  Name,
  Email,
}

/// Text typed into the add-user form.
#[derive(Debug, Default)]
pub struct UserForm {
  pub name:  String,
  pub email: String,
  pub focus: FormField,
}

impl UserForm {
  fn focused_mut(&mut self) -> &mut String {
    match self.focus {
      FormField::Name => &mut self.name,
      FormField::Email => &mut self.email,
    }
  }

  fn toggle_focus(&mut self) {
    self.focus = match self.focus {
      FormField::Name => FormField::Email,
      FormField::Email => FormField::Name,
    };
  }

  /// The create payload, or `None` while either field is blank.
  pub fn submission(&self) -> Option<NewUser> {
    let name = self.name.trim();
    let email = self.email.trim();
    if name.is_empty() || email.is_empty() {
      return None;
    }
    Some(NewUser {
      name:  name.to_string(),
      email: email.to_string(),
      role:  roles::USER.to_string(),
    })
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// The list shown on screen and the current selection.
  pub roster: Roster,

  /// Durable mirror of `roster`'s users, rewritten after every mutation.
  cache: Persisted<Vec<User>>,

  /// Remote API; `None` runs purely against the local cache.
  client: Option<ApiClient>,

  /// Gates manual reloads.
  reload: Throttle,

  /// Current fuzzy-filter string (only edited when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* user list.
  pub list_cursor: usize,

  pub form: UserForm,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  /// Create an [`App`] from the list cached in `store`, falling back to the
  /// demo users. With a `client`, add and remove are mirrored remotely.
  pub fn new(store: Arc<dyn KvStore>, client: Option<ApiClient>) -> Self {
    let cache = Persisted::load(store, USERS_KEY, demo_users());
    let roster = Roster::new(cache.get().clone());
    Self {
      screen: Screen::List,
      roster,
      cache,
      client,
      reload: Throttle::new(Duration::from_secs(1)),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      form: UserForm::default(),
      status_msg: String::new(),
    }
  }

  pub fn is_remote(&self) -> bool {
    self.client.is_some()
  }

  fn persist(&mut self) {
    self.cache.set(self.roster.users().to_vec());
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Replace the local list with the server's. On failure the cached list
  /// stays on screen and the error goes to the status bar.
  pub async fn load(&mut self) {
    let Some(client) = &self.client else {
      return;
    };
    self.status_msg = "Loading users…".into();
    let result = client.users().list_all().await;
    match result {
      Ok(users) => {
        tracing::info!(count = users.len(), "loaded users from server");
        self.roster.replace_all(users);
        self.persist();
        self.clamp_cursor();
        self.status_msg = String::new();
      }
      Err(e) => {
        self.status_msg = format!("Offline, showing cached users: {e}");
      }
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Add `new_user` locally under a fresh id, then create it remotely. The
  /// server's copy replaces the local one; on failure the local one is
  /// removed again.
  pub async fn add_user(&mut self, new_user: NewUser) {
    let local_id = self.roster.next_id();
    self.status_msg = format!("Added {}", new_user.name);
    self.roster.add(new_user.clone().into_user(local_id));
    self.persist();

    let Some(client) = &self.client else {
      return;
    };
    let result = client.users().create(&new_user).await;
    match result {
      Ok(created) => {
        if self.roster.replace(local_id, created) {
          self.persist();
        } else {
          tracing::debug!(id = local_id, "user gone before create completed, dropping result");
        }
      }
      Err(e) => {
        self.roster.remove(local_id);
        self.persist();
        self.clamp_cursor();
        self.status_msg = format!("Add failed: {e}");
      }
    }
  }

  /// Remove user `id` locally, then remotely. On failure it is put back at
  /// its old position.
  pub async fn remove_user(&mut self, id: UserId) {
    let Some((index, user)) = self.roster.remove(id) else {
      return;
    };
    self.status_msg = format!("Removed {}", user.name);
    self.persist();
    self.clamp_cursor();

    let Some(client) = &self.client else {
      return;
    };
    let result = client.users().remove(id).await;
    if let Err(e) = result {
      if self.roster.get(id).is_some() {
        tracing::debug!(id, "user reappeared before remove failed, skipping rollback");
      } else {
        self.roster.insert_at(index, user);
        self.persist();
      }
      self.status_msg = format!("Remove failed: {e}");
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Users whose name or email matches the current filter query.
  pub fn filtered_users(&self) -> Vec<&User> {
    if self.filter.is_empty() {
      return self.roster.users().iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .roster
      .users()
      .iter()
      .filter(|u| {
        matcher.fuzzy_match(&u.name, &self.filter).is_some()
          || matcher.fuzzy_match(&u.email, &self.filter).is_some()
      })
      .collect()
  }

  /// The user under the list cursor in the filtered view, if any.
  pub fn cursor_user(&self) -> Option<&User> {
    self.filtered_users().get(self.list_cursor).copied()
  }

  fn cursor_id(&self) -> Option<UserId> {
    self.cursor_user().map(|u| u.id)
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_users().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.screen {
      Screen::List => self.handle_list_key(key).await,
      Screen::Detail => self.handle_detail_key(key).await,
      Screen::Form => {
        self.handle_form_key(key).await;
        true
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // A single match opens straight away.
        let single = match self.filtered_users().as_slice() {
          [only] => Some(only.id),
          _ => None,
        };
        if let Some(id) = single {
          self.open_detail(id);
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_users().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_id() {
          self.open_detail(id);
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('a') => {
        self.form = UserForm::default();
        self.screen = Screen::Form;
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_id() {
          self.remove_user(id).await;
        }
      }
      KeyCode::Char('r') if self.is_remote() => {
        if self.reload.call(|| ()).is_some() {
          self.load().await;
        }
      }

      _ => {}
    }
    true
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::List;
        self.roster.clear_selection();
      }

      KeyCode::Char('d') => {
        if let Some(id) = self.roster.selected().map(|u| u.id) {
          self.remove_user(id).await;
        }
        self.screen = Screen::List;
      }

      // Step through the list without leaving the detail pane.
      KeyCode::Char(']') | KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_users().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
          if let Some(id) = self.cursor_id() {
            self.open_detail(id);
          }
        }
      }
      KeyCode::Char('[') | KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          if let Some(id) = self.cursor_id() {
            self.open_detail(id);
          }
        }
      }

      _ => {}
    }
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.form = UserForm::default();
        self.screen = Screen::List;
      }
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.form.toggle_focus(),
      KeyCode::Enter => {
        // Blank fields keep the form open without comment.
        let Some(new_user) = self.form.submission() else {
          return;
        };
        self.form = UserForm::default();
        self.screen = Screen::List;
        self.add_user(new_user).await;
      }
      KeyCode::Backspace => {
        self.form.focused_mut().pop();
      }
      KeyCode::Char(c) => self.form.focused_mut().push(c),
      _ => {}
    }
  }

  fn open_detail(&mut self, id: UserId) {
    self.roster.select(Some(id));
    self.screen = Screen::Detail;
  }
}
