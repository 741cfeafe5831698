//! Pure, stateless helpers used across the workspace.

pub mod collections;
pub mod format;
pub mod id;
pub mod text;
pub mod validate;
