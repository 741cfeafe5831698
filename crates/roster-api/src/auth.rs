//! Handlers for `/auth` endpoints and bearer-token verification.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: [`Registration`]; 201 + session; 409 if the email is taken |
//! | `POST` | `/auth/login` | Body: [`Credentials`]; session; 401 on bad credentials |
//! | `POST` | `/auth/logout` | Bearer required; 204 |
//! | `POST` | `/auth/refresh` | Bearer required; old token revoked, new one returned |

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use chrono::Utc;
use rand_core::OsRng;
use roster_core::{
  user::{NewUser, roles},
  wire::{AuthSession, Credentials, Registration, TokenRefresh},
};

use crate::{AppState, directory::Account, error::ApiError};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .filter(|t| !t.is_empty())
    .ok_or(ApiError::Unauthorized)
}

fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

fn verify_password(password: &str, phc: &str) -> Result<(), ApiError> {
  let parsed = PasswordHash::new(phc).map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /auth/register`
pub async fn register(
  State(state): State<AppState>,
  Json(body): Json<Registration>,
) -> Result<impl IntoResponse, ApiError> {
  if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
    return Err(ApiError::BadRequest("name, email and password are required".into()));
  }
  let password_hash = hash_password(&body.password)?;

  let mut dir = state.directory.write().await;
  if dir.has_account(&body.email) {
    return Err(ApiError::Conflict(format!("{} is already registered", body.email)));
  }
  let user = dir.create(
    NewUser {
      name:  body.name,
      email: body.email.clone(),
      role:  roles::USER.into(),
    },
    Utc::now(),
  );
  dir.add_account(body.email, Account { user_id: user.id, password_hash });
  let token = dir.open_session(user.id);
  tracing::info!(id = user.id, "account registered");

  Ok((StatusCode::CREATED, Json(AuthSession { token, user })))
}

// ─── Login ────────────────────────────────────────────────────────────────────

/// `POST /auth/login`
pub async fn login(
  State(state): State<AppState>,
  Json(body): Json<Credentials>,
) -> Result<Json<AuthSession>, ApiError> {
  let account = state
    .directory
    .read()
    .await
    .account(&body.email)
    .cloned()
    .ok_or(ApiError::Unauthorized)?;
  verify_password(&body.password, &account.password_hash)?;

  let mut dir = state.directory.write().await;
  let user = dir
    .get(account.user_id)
    .cloned()
    .ok_or(ApiError::Unauthorized)?;
  let token = dir.open_session(user.id);
  Ok(Json(AuthSession { token, user }))
}

// ─── Logout ───────────────────────────────────────────────────────────────────

/// `POST /auth/logout`
pub async fn logout(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
  let token = bearer_token(&headers)?;
  if !state.directory.write().await.close_session(token) {
    return Err(ApiError::Unauthorized);
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Refresh ──────────────────────────────────────────────────────────────────

/// `POST /auth/refresh`
pub async fn refresh(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<TokenRefresh>, ApiError> {
  let token = bearer_token(&headers)?;
  let mut dir = state.directory.write().await;
  let user_id = dir.session_user(token).ok_or(ApiError::Unauthorized)?;
  dir.close_session(token);
  Ok(Json(TokenRefresh { token: dir.open_session(user_id) }))
}

#[cfg(test)]
mod tests {
  use axum::{body::Body, http::Request};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;
  use crate::api_router;

  async fn post(state: &AppState, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
      req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
      Some(body) => req
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string())),
      None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = api_router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  fn registration() -> Value {
    json!({ "name": "Li Si", "email": "lisi@example.com", "password": "hunter2" })
  }

  #[test]
  fn bearer_parsing() {
    let mut headers = HeaderMap::new();
    assert!(matches!(bearer_token(&headers), Err(ApiError::Unauthorized)));

    headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
    assert!(bearer_token(&headers).is_err());

    headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
    assert_eq!(bearer_token(&headers).unwrap(), "abc");
  }

  #[tokio::test]
  async fn register_then_login() {
    let state = AppState::default();
    let (status, session) = post(&state, "/auth/register", None, Some(registration())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["user"]["role"], "user");
    assert!(session["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, _) = post(&state, "/auth/register", None, Some(registration())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let creds = json!({ "email": "lisi@example.com", "password": "hunter2" });
    let (status, session) = post(&state, "/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user"]["email"], "lisi@example.com");

    let wrong = json!({ "email": "lisi@example.com", "password": "nope" });
    let (status, body) = post(&state, "/auth/login", None, Some(wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
  }

  #[tokio::test]
  async fn refresh_rotates_and_logout_revokes() {
    let state = AppState::default();
    let (_, session) = post(&state, "/auth/register", None, Some(registration())).await;
    let token = session["token"].as_str().unwrap().to_string();

    let (status, refreshed) = post(&state, "/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let fresh = refreshed["token"].as_str().unwrap().to_string();
    assert_ne!(fresh, token);

    let (status, _) = post(&state, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&state, "/auth/logout", Some(&fresh), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = post(&state, "/auth/refresh", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }
}
