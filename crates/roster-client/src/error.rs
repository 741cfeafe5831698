//! Error type for `roster-client`.

use reqwest::{Method, StatusCode, header::InvalidHeaderValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with a non-2xx status.
  #[error("HTTP error! status: {status} ({method} {url})")]
  Status {
    method: Method,
    url:    String,
    status: StatusCode,
  },

  /// The request never produced a complete response.
  #[error("request to {url} failed: {source}")]
  Transport {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  /// The response body was not the JSON the caller asked for.
  #[error("malformed response body from {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode request body: {0}")]
  Encode(#[source] serde_json::Error),

  #[error("invalid header value: {0}")]
  InvalidHeader(#[from] InvalidHeaderValue),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),
}

impl ClientError {
  /// The HTTP status, for [`ClientError::Status`] only.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ClientError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
