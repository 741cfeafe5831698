//! Mock JSON REST API for Roster.
//!
//! Serves the user and auth endpoints from an in-memory [`Directory`]. Used
//! as the demo backend for the terminal front-end and as the server the
//! client's tests talk to.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::app(AppState::seeded());  // everything under /api
//! ```

pub mod auth;
pub mod directory;
pub mod error;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use directory::Directory;
pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised by the `roster-mock` binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Start with the demo users instead of an empty directory.
  pub seed: bool,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone, Default)]
pub struct AppState {
  pub directory: Arc<RwLock<Directory>>,
}

impl AppState {
  pub fn new(directory: Directory) -> Self {
    Self { directory: Arc::new(RwLock::new(directory)) }
  }

  /// State holding the demo users.
  pub fn seeded() -> Self {
    Self::new(Directory::with_users(roster_core::fixtures::demo_users()))
  }
}

// ─── Routers ──────────────────────────────────────────────────────────────────

/// The resource routes, unprefixed.
pub fn api_router(state: AppState) -> Router<()> {
  Router::new()
    // Users
    .route("/users", get(users::list).post(users::create))
    .route(
      "/users/{id}",
      get(users::get_one).put(users::update).delete(users::remove),
    )
    // Auth
    .route("/auth/login", post(auth::login))
    .route("/auth/register", post(auth::register))
    .route("/auth/logout", post(auth::logout))
    .route("/auth/refresh", post(auth::refresh))
    .with_state(state)
}

/// The full application: [`api_router`] under `/api`, with request tracing.
pub fn app(state: AppState) -> Router<()> {
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}
