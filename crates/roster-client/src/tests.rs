//! Client tests against real HTTP servers bound to an ephemeral port.

use std::{
  collections::HashMap,
  io,
  sync::{Arc, Mutex},
};

use axum::{
  Json, Router,
  body::Bytes,
  http::{HeaderMap, StatusCode, header},
  routing::{any, delete, get, post},
};
use roster_api::AppState;
use roster_core::{
  user::{NewUser, UserPatch, roles},
  wire::{Credentials, Registration},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::{ApiClient, ApiConfig, ClientError, RequestOptions};

async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, router).await.unwrap();
  });
  format!("http://{addr}/api")
}

fn client(base_url: String) -> ApiClient {
  ApiClient::new(ApiConfig::new(base_url)).unwrap()
}

/// Echoes what the server received.
#[derive(Debug, Deserialize)]
struct Echo {
  authorization: Option<String>,
  content_type:  Option<String>,
  custom:        Option<String>,
  body:          String,
}

async fn echo(headers: HeaderMap, body: Bytes) -> Json<Value> {
  let read = |name: &str| {
    headers
      .get(name)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string)
  };
  Json(json!({
    "authorization": read(header::AUTHORIZATION.as_str()),
    "content_type":  read(header::CONTENT_TYPE.as_str()),
    "custom":        read("x-custom"),
    "body":          String::from_utf8_lossy(&body),
  }))
}

fn echo_router() -> Router {
  Router::new()
    .route("/api/echo", any(echo))
    .route("/api/users", get(|| async { StatusCode::NOT_FOUND }))
    .route("/api/garbage", get(|| async { "definitely not json" }))
    .route("/api/empty", any(|| async { StatusCode::NO_CONTENT }))
}

// ─── Status and transport failures ────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_an_error_with_the_code() {
  let api = client(serve(echo_router()).await);
  let err = api.users().list_all().await.unwrap_err();

  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
  assert!(matches!(err, ClientError::Status { .. }));
  assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
  let api = client(serve(echo_router()).await);
  let err = api.get::<Value>("/garbage").await.unwrap_err();
  assert!(matches!(err, ClientError::Decode { .. }));
  assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let api = client(format!("http://{addr}/api"));
  let err = api.get::<Value>("/users").await.unwrap_err();
  assert!(matches!(err, ClientError::Transport { .. }));
}

#[tokio::test]
async fn empty_success_body_decodes_as_unit() {
  let api = client(serve(echo_router()).await);
  api.delete::<()>("/empty").await.unwrap();
  assert_eq!(api.post_empty::<Option<Value>>("/empty").await.unwrap(), None);
}

#[tokio::test]
async fn unencodable_body_fails_before_sending_and_is_logged() {
  let logs = Captured::default();
  let sink = logs.clone();
  let subscriber = tracing_subscriber::fmt()
    .with_writer(move || sink.clone())
    .with_ansi(false)
    .finish();
  let _guard = tracing::subscriber::set_default(subscriber);

  // JSON object keys must be strings.
  let body = HashMap::from([((1, 2), 3)]);
  let api = client("http://127.0.0.1:9/api".to_string());

  let err = api.post::<Value, _>("/users", &body).await.unwrap_err();
  assert!(matches!(err, ClientError::Encode(_)));
  let err = api.put::<Value, _>("/users/1", &body).await.unwrap_err();
  assert!(matches!(err, ClientError::Encode(_)));

  let text = logs.text();
  assert_eq!(text.matches("API request failed").count(), 2);
  assert!(text.contains("http://127.0.0.1:9/api/users/1"));
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
  fn text(&self) -> String {
    String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
  }
}

impl io::Write for Captured {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

// ─── Headers and bodies ───────────────────────────────────────────────────────

#[tokio::test]
async fn auth_token_is_sent_until_removed() {
  let mut api = client(serve(echo_router()).await);

  api.set_auth_token("abc").unwrap();
  let seen: Echo = api.get("/echo").await.unwrap();
  assert_eq!(seen.authorization.as_deref(), Some("Bearer abc"));
  assert_eq!(seen.content_type.as_deref(), Some("application/json"));

  api.remove_auth_token();
  let seen: Echo = api.get("/echo").await.unwrap();
  assert_eq!(seen.authorization, None);
}

#[tokio::test]
async fn per_call_headers_override_instance_headers() {
  let mut api = client(serve(echo_router()).await);
  api.set_auth_token("instance").unwrap();
  api.set_header(
    "x-custom".parse().unwrap(),
    "from-client".parse().unwrap(),
  );

  let options = RequestOptions::new().header(
    header::AUTHORIZATION,
    "Bearer per-call".parse().unwrap(),
  );
  let seen: Echo = api
    .request(crate::Method::GET, "/echo", options)
    .await
    .unwrap();

  assert_eq!(seen.authorization.as_deref(), Some("Bearer per-call"));
  assert_eq!(seen.custom.as_deref(), Some("from-client"));
}

#[tokio::test]
async fn body_is_json_text_or_absent() {
  let api = client(serve(echo_router()).await);

  let seen: Echo = api
    .post("/echo", &json!({ "name": "Li Si" }))
    .await
    .unwrap();
  assert_eq!(seen.body, r#"{"name":"Li Si"}"#);

  let seen: Echo = api.post_empty("/echo").await.unwrap();
  assert_eq!(seen.body, "");

  let seen: Echo = api.put("/echo", &UserPatch::default()).await.unwrap();
  assert_eq!(seen.body, "{}");
}

// ─── Façades against the mock server ──────────────────────────────────────────

#[tokio::test]
async fn void_calls_ignore_json_bodies() {
  let router = Router::new()
    .route(
      "/api/users/{id}",
      delete(|| async { Json(json!({"success": true, "message": "deleted"})) }),
    )
    .route(
      "/api/auth/logout",
      post(|| async { Json(json!({"success": true})) }),
    );
  let api = client(serve(router).await);

  api.users().remove(7).await.unwrap();
  api.auth().logout().await.unwrap();
}

#[tokio::test]
async fn users_crud_round_trip() {
  let api = client(serve(roster_api::app(AppState::seeded())).await);
  let users = api.users();

  assert_eq!(users.list_all().await.unwrap().len(), 3);

  let created = users
    .create(&NewUser {
      name:  "Zhao Liu".into(),
      email: "zhaoliu@example.com".into(),
      role:  roles::USER.into(),
    })
    .await
    .unwrap();
  assert_eq!(created.id, 4);
  assert_eq!(users.get_one(4).await.unwrap().name, "Zhao Liu");

  let updated = users
    .update(4, &UserPatch { role: Some(roles::ADMIN.into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(updated.role, roles::ADMIN);
  assert!(updated.updated_at.is_some());

  let page = users.list_page(2, 3).await.unwrap();
  assert_eq!(page.total, 4);
  assert_eq!(page.total_pages, 2);
  assert_eq!(page.data.iter().map(|u| u.id).collect::<Vec<_>>(), vec![4]);

  users.remove(4).await.unwrap();
  let err = users.get_one(4).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
  let err = users.remove(4).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn auth_flow_with_explicit_token_handling() {
  let mut api = client(serve(roster_api::app(AppState::default())).await);

  let session = api
    .auth()
    .register(&Registration {
      name:     "Li Si".into(),
      email:    "lisi@example.com".into(),
      password: "hunter2".into(),
    })
    .await
    .unwrap();
  assert_eq!(session.user.role, roles::USER);

  // Registering does not touch the client's headers.
  assert!(api.headers().get(header::AUTHORIZATION).is_none());
  let err = api.auth().refresh().await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

  api.set_auth_token(&session.token).unwrap();
  let refreshed = api.auth().refresh().await.unwrap();
  api.set_auth_token(&refreshed.token).unwrap();
  api.auth().logout().await.unwrap();

  let err = api.auth().logout().await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

  let login = api
    .auth()
    .login(&Credentials {
      email:    "lisi@example.com".into(),
      password: "hunter2".into(),
    })
    .await
    .unwrap();
  assert_eq!(login.user.id, session.user.id);
}
