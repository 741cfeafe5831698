//! Typed wrappers for the `/users` endpoints.

use roster_core::{
  user::{NewUser, User, UserId, UserPatch},
  wire::Paginated,
};

use serde::de::IgnoredAny;

use crate::{ApiClient, Result};

const RESOURCE: &str = "/users";

/// CRUD façade for users. Each method maps onto exactly one request; all
/// failure modes are the underlying client's.
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
  client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
  pub fn new(client: &'a ApiClient) -> Self {
    Self { client }
  }

  fn item(id: UserId) -> String {
    format!("{RESOURCE}/{id}")
  }

  /// `GET /users`
  pub async fn list_all(&self) -> Result<Vec<User>> {
    self.client.get(RESOURCE).await
  }

  /// `GET /users?page=<page>&limit=<limit>`
  pub async fn list_page(&self, page: usize, limit: usize) -> Result<Paginated<User>> {
    self
      .client
      .get(&format!("{RESOURCE}?page={page}&limit={limit}"))
      .await
  }

  /// `GET /users/{id}`
  pub async fn get_one(&self, id: UserId) -> Result<User> {
    self.client.get(&Self::item(id)).await
  }

  /// `POST /users`
  pub async fn create(&self, data: &NewUser) -> Result<User> {
    self.client.post(RESOURCE, data).await
  }

  /// `PUT /users/{id}`
  pub async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
    self.client.put(&Self::item(id), patch).await
  }

  /// `DELETE /users/{id}`. Whatever the server sends back is ignored.
  pub async fn remove(&self, id: UserId) -> Result<()> {
    self
      .client
      .delete::<IgnoredAny>(&Self::item(id))
      .await
      .map(|_| ())
  }
}
