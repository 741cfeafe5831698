//! Typed wrappers for the `/auth` endpoints.
//!
//! These return what the server sent and leave the client's headers alone;
//! call [`ApiClient::set_auth_token`] with the returned token to use it.

use roster_core::wire::{AuthSession, Credentials, Registration, TokenRefresh};

use serde::de::IgnoredAny;

use crate::{ApiClient, Result};

#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
  client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
  pub fn new(client: &'a ApiClient) -> Self {
    Self { client }
  }

  /// `POST /auth/login`
  pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
    self.client.post("/auth/login", credentials).await
  }

  /// `POST /auth/register`
  pub async fn register(&self, registration: &Registration) -> Result<AuthSession> {
    self.client.post("/auth/register", registration).await
  }

  /// `POST /auth/logout`. The response body, if any, is ignored.
  pub async fn logout(&self) -> Result<()> {
    self
      .client
      .post_empty::<IgnoredAny>("/auth/logout")
      .await
      .map(|_| ())
  }

  /// `POST /auth/refresh`
  pub async fn refresh(&self) -> Result<TokenRefresh> {
    self.client.post_empty("/auth/refresh").await
  }
}
