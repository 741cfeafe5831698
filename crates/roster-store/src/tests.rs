//! Tests for the slot backends and `Persisted`.

use std::sync::Arc;

use roster_core::{
  fixtures::demo_users,
  user::{User, roles},
};
use serde::{Deserialize, Serialize};

use crate::{Error, KvStore, KvStoreExt, MemoryKv, Persisted, Result, SqliteKv};

/// A backend whose every call fails.
struct BrokenKv;

impl KvStore for BrokenKv {
  fn get(&self, _: &str) -> Result<Option<String>> {
    Err(Error::Unavailable("disk on fire".into()))
  }
  fn set(&self, _: &str, _: &str) -> Result<()> {
    Err(Error::Unavailable("disk on fire".into()))
  }
  fn remove(&self, _: &str) -> Result<()> {
    Err(Error::Unavailable("disk on fire".into()))
  }
  fn clear(&self) -> Result<()> {
    Err(Error::Unavailable("disk on fire".into()))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Prefs {
  theme:     String,
  page_size: usize,
}

fn prefs() -> Prefs {
  Prefs { theme: "dark".into(), page_size: 20 }
}

fn backends() -> Vec<Arc<dyn KvStore>> {
  vec![
    Arc::new(MemoryKv::new()),
    Arc::new(SqliteKv::open_in_memory().expect("in-memory sqlite")),
  ]
}

// ─── Raw backends ─────────────────────────────────────────────────────────────

#[test]
fn get_set_remove_clear() {
  for kv in backends() {
    assert_eq!(kv.get("a").unwrap(), None);

    kv.set("a", "1").unwrap();
    kv.set("b", "2").unwrap();
    kv.set("a", "3").unwrap();
    assert_eq!(kv.get("a").unwrap().as_deref(), Some("3"));

    kv.remove("a").unwrap();
    kv.remove("a").unwrap();
    assert_eq!(kv.get("a").unwrap(), None);

    kv.clear().unwrap();
    assert_eq!(kv.get("b").unwrap(), None);
  }
}

#[test]
fn sqlite_slots_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("slots.db");

  {
    let kv: Arc<dyn KvStore> = Arc::new(SqliteKv::open(&path).unwrap());
    let mut users = Persisted::load(kv, "users", Vec::<User>::new());
    users.set(demo_users());
  }

  let kv: Arc<dyn KvStore> = Arc::new(SqliteKv::open(&path).unwrap());
  let users = Persisted::load(kv, "users", Vec::<User>::new());
  assert_eq!(users.get(), &demo_users());
}

#[test]
fn json_helpers_swallow_failures() {
  let broken = BrokenKv;
  assert_eq!(broken.get_json::<Prefs>("prefs"), None);
  assert!(!broken.set_json("prefs", &prefs()));

  let kv = MemoryKv::new();
  kv.set("prefs", "{not json").unwrap();
  assert_eq!(kv.get_json::<Prefs>("prefs"), None);
  assert!(kv.set_json("prefs", &prefs()));
  assert_eq!(kv.get_json::<Prefs>("prefs"), Some(prefs()));
}

// ─── Persisted ────────────────────────────────────────────────────────────────

#[test]
fn round_trip_through_reload() {
  for kv in backends() {
    let mut slot = Persisted::load(kv.clone(), "prefs", prefs());
    let written = Prefs { theme: "light".into(), page_size: 5 };
    slot.set(written.clone());

    let reloaded = Persisted::load(kv, "prefs", prefs());
    assert_eq!(reloaded.get(), &written);
  }
}

#[test]
fn external_clear_resets_to_default() {
  let kv: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
  let mut slot = Persisted::load(kv.clone(), "count", 0u32);
  slot.set(9);
  kv.clear().unwrap();

  assert_eq!(*Persisted::load(kv, "count", 0u32).get(), 0);
}

#[test]
fn update_matches_set_of_applied_function() {
  let bump = |v: &Vec<i32>| {
    let mut next = v.clone();
    next.push(next.len() as i32);
    next
  };

  let kv_a: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
  let kv_b: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
  let mut a = Persisted::load(kv_a.clone(), "xs", vec![7]);
  let mut b = Persisted::load(kv_b.clone(), "xs", vec![7]);

  a.update(bump);
  let expected = bump(b.get());
  b.set(expected);

  assert_eq!(a.get(), b.get());
  assert_eq!(kv_a.get("xs").unwrap(), kv_b.get("xs").unwrap());
}

#[test]
fn undecodable_slot_falls_back_to_default() {
  let kv: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
  kv.set("prefs", "[1, 2, 3]").unwrap();

  let slot = Persisted::load(kv, "prefs", prefs());
  assert_eq!(slot.get(), &prefs());
}

#[test]
fn failing_backend_keeps_in_memory_value() {
  let mut slot = Persisted::load(Arc::new(BrokenKv), "prefs", prefs());
  assert_eq!(slot.get(), &prefs());

  slot.update(|p| Prefs { page_size: p.page_size * 2, ..p.clone() });
  assert_eq!(slot.get().page_size, 40);
  assert!(!slot.flush());
}

#[test]
fn two_owners_of_one_key_last_write_wins() {
  let kv: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
  let mut first = Persisted::load(kv.clone(), "role", roles::USER.to_string());
  let mut second = Persisted::load(kv.clone(), "role", roles::USER.to_string());

  first.set(roles::ADMIN.to_string());
  second.set(roles::EDITOR.to_string());

  assert_eq!(first.get(), roles::ADMIN);
  assert_eq!(
    Persisted::load(kv, "role", String::new()).get(),
    roles::EDITOR
  );
}
