//! Core types for the Roster user directory.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It holds
//! the user entity and its wire shapes, the in-memory list/detail selection
//! controller ([`Roster`]), and a small library of pure helpers.

pub mod error;
pub mod fixtures;
pub mod roster;
pub mod user;
pub mod util;
pub mod wire;

pub use error::{Error, Result};
pub use roster::{Roster, Selection};
pub use user::{NewUser, User, UserId, UserPatch};
