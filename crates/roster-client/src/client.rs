//! [`ApiClient`]: the generic request/response layer.

use reqwest::{
  Client, Method,
  header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
  auth::AuthApi,
  config::ApiConfig,
  error::{ClientError, Result},
  users::UsersApi,
};

// ─── Per-call options ─────────────────────────────────────────────────────────

/// Headers and body for a single request.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
  /// Applied last; these win over the client's own headers.
  pub headers: HeaderMap,
  /// Already-encoded JSON text. `None` sends no body at all.
  pub body:    Option<String>,
}

impl RequestOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
    self.headers.insert(name, value);
    self
  }

  /// Encode `data` as the JSON body.
  pub fn json<B: Serialize + ?Sized>(mut self, data: &B) -> Result<Self> {
    self.body = Some(serde_json::to_string(data).map_err(ClientError::Encode)?);
    Ok(self)
  }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the Roster JSON API.
///
/// Owns its header set. Auth and custom headers change only through
/// `&mut self`, so whoever holds the client decides when later calls see a
/// new token; share it behind your own lock if several tasks need to mutate
/// it. No timeout and no retries are applied: every failure reaches the
/// caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
  http:     Client,
  base_url: String,
  headers:  HeaderMap,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let http = Client::builder().build().map_err(ClientError::Build)?;
    Ok(Self {
      http,
      base_url: config.base_url,
      headers: HeaderMap::new(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Instance headers, excluding the defaults.
  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }

  // ── Header management ─────────────────────────────────────────────────────

  /// Send `Authorization: Bearer <token>` on every later request.
  pub fn set_auth_token(&mut self, token: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    self.headers.insert(AUTHORIZATION, value);
    Ok(())
  }

  /// Stop sending the `Authorization` header.
  pub fn remove_auth_token(&mut self) {
    self.headers.remove(AUTHORIZATION);
  }

  pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
    self.headers.insert(name, value);
  }

  // ── Façades ───────────────────────────────────────────────────────────────

  pub fn users(&self) -> UsersApi<'_> {
    UsersApi::new(self)
  }

  pub fn auth(&self) -> AuthApi<'_> {
    AuthApi::new(self)
  }

  // ── Requests ──────────────────────────────────────────────────────────────

  /// Base address and `endpoint` concatenated verbatim.
  pub fn url(&self, endpoint: &str) -> String {
    format!("{}{}", self.base_url, endpoint)
  }

  /// Defaults, then instance headers, then `overrides`; later layers replace
  /// earlier values for the same name.
  fn merged_headers(&self, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = HeaderMap::new();
    merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for layer in [&self.headers, overrides] {
      for name in layer.keys() {
        merged.remove(name);
      }
      for (name, value) in layer {
        merged.append(name.clone(), value.clone());
      }
    }
    merged
  }

  /// Issue `method endpoint` and decode a 2xx JSON body as `T`.
  ///
  /// An empty success body decodes as JSON `null`, so `T = ()` or
  /// `Option<_>` accept bodiless responses. Failures are logged here once
  /// and returned unchanged.
  pub async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    endpoint: &str,
    options: RequestOptions,
  ) -> Result<T> {
    let url = self.url(endpoint);
    tracing::debug!(%method, %url, "api request");
    let result = self.execute(method.clone(), &url, options).await;
    if let Err(e) = &result {
      tracing::error!(%method, %url, error = %e, "API request failed");
    }
    result
  }

  async fn execute<T: DeserializeOwned>(
    &self,
    method: Method,
    url: &str,
    options: RequestOptions,
  ) -> Result<T> {
    let mut req = self
      .http
      .request(method.clone(), url)
      .headers(self.merged_headers(&options.headers));
    if let Some(body) = options.body {
      req = req.body(body);
    }

    let transport = |source| ClientError::Transport { url: url.to_string(), source };
    let resp = req.send().await.map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Status { method, url: url.to_string(), status });
    }

    let bytes = resp.bytes().await.map_err(transport)?;
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
      b"null"
    } else {
      &bytes
    };
    serde_json::from_slice(body).map_err(|source| ClientError::Decode {
      url: url.to_string(),
      source,
    })
  }

  /// JSON body for `method endpoint`. Failures are logged like `request`.
  fn encode<B: Serialize + ?Sized>(
    &self,
    method: &Method,
    endpoint: &str,
    data: &B,
  ) -> Result<RequestOptions> {
    RequestOptions::new().json(data).inspect_err(|e| {
      tracing::error!(%method, url = %self.url(endpoint), error = %e, "API request failed");
    })
  }

  // ── Verbs ─────────────────────────────────────────────────────────────────

  pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
    self.request(Method::GET, endpoint, RequestOptions::new()).await
  }

  /// `POST` with `data` encoded as the JSON body.
  pub async fn post<T, B>(&self, endpoint: &str, data: &B) -> Result<T>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let options = self.encode(&Method::POST, endpoint, data)?;
    self.request(Method::POST, endpoint, options).await
  }

  /// `POST` with no body.
  pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
    self.request(Method::POST, endpoint, RequestOptions::new()).await
  }

  /// `PUT` with `data` encoded as the JSON body.
  pub async fn put<T, B>(&self, endpoint: &str, data: &B) -> Result<T>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let options = self.encode(&Method::PUT, endpoint, data)?;
    self.request(Method::PUT, endpoint, options).await
  }

  /// `PUT` with no body.
  pub async fn put_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
    self.request(Method::PUT, endpoint, RequestOptions::new()).await
  }

  pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
    self.request(Method::DELETE, endpoint, RequestOptions::new()).await
  }
}
