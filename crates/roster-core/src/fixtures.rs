//! Demo data for the terminal front-end and the mock server.

use crate::user::{User, roles};

/// Three users, one per well-known role, ids 1..=3.
pub fn demo_users() -> Vec<User> {
  vec![
    User::new(1, "Zhang San", "zhangsan@example.com", roles::ADMIN),
    User::new(2, "Li Si", "lisi@example.com", roles::USER),
    User::new(3, "Wang Wu", "wangwu@example.com", roles::EDITOR),
  ]
}
