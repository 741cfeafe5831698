//! Typed HTTP client for the Roster JSON API.
//!
//! [`ApiClient`] is the generic request/response layer: base address, header
//! management and uniform error surfacing. [`UsersApi`] and [`AuthApi`] are
//! narrow typed façades built on top of it.
//!
//! ```rust,ignore
//! let mut client = ApiClient::new(ApiConfig::from_env())?;
//! client.set_auth_token("abc")?;
//! let users = client.users().list_all().await?;
//! ```

mod auth;
mod client;
mod config;
mod error;
mod users;

pub mod params;
pub mod timing;

pub use auth::AuthApi;
pub use client::{ApiClient, RequestOptions};
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use reqwest::{Method, StatusCode, Url};
pub use users::UsersApi;

#[cfg(test)]
mod tests;
