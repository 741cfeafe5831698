//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Plain array; with `?page=&limit=` a [`Paginated`] page |
//! | `POST`   | `/users` | Body: [`NewUser`]; returns 201 + stored user |
//! | `GET`    | `/users/{id}` | 404 if not found |
//! | `PUT`    | `/users/{id}` | Body: [`UserPatch`]; returns updated user |
//! | `DELETE` | `/users/{id}` | 204; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use roster_core::{
  user::{NewUser, User, UserId, UserPatch},
  wire::Paginated,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page:  Option<usize>,
  pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListResponse {
  All(Vec<User>),
  Page(Paginated<User>),
}

/// `GET /users[?page=<n>&limit=<n>]`
pub async fn list(
  State(state): State<AppState>,
  Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
  let dir = state.directory.read().await;
  let body = match (params.page, params.limit) {
    (None, None) => ListResponse::All(dir.users().to_vec()),
    (page, limit) => {
      let page = page.unwrap_or(1);
      let limit = limit.unwrap_or(10);
      if page == 0 || limit == 0 {
        return Err(ApiError::BadRequest("page and limit must be at least 1".into()));
      }
      ListResponse::Page(Paginated::from_slice(dir.users(), page, limit))
    }
  };
  Ok(Json(body))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/{id}`
pub async fn get_one(
  State(state): State<AppState>,
  Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
  let dir = state.directory.read().await;
  let user = dir
    .get(id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /users`
pub async fn create(
  State(state): State<AppState>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
  if body.name.trim().is_empty() || body.email.trim().is_empty() {
    return Err(ApiError::BadRequest("name and email are required".into()));
  }
  let user = state.directory.write().await.create(body, Utc::now());
  tracing::info!(id = user.id, "user created");
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /users/{id}`
pub async fn update(
  State(state): State<AppState>,
  Path(id): Path<UserId>,
  Json(patch): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
  let user = state
    .directory
    .write()
    .await
    .update(id, &patch, Utc::now())
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{id}`
pub async fn remove(
  State(state): State<AppState>,
  Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
  state
    .directory
    .write()
    .await
    .remove(id)
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  tracing::info!(id, "user deleted");
  Ok(StatusCode::NO_CONTENT)
}
