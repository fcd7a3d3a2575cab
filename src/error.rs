//! Error taxonomy shared by every layer of the client.
//!
//! A call fails with exactly one classified [`ZabbixError`]; nothing is logged
//! and dropped on the way up. The only failure handled internally is the
//! single re-login performed by [`crate::session::Session::call`] when the
//! server reports an expired session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZabbixError>;

/// The `error` member of a JSON-RPC response, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Phrases the server uses when an auth token is unknown or has expired.
const SESSION_EXPIRED_MARKERS: [&str; 4] = [
    "session terminated",
    "re-login",
    "not authorised",
    "not authorized",
];

impl ApiError {
    /// `data` rendered as text, whatever JSON type the server used.
    pub fn details(&self) -> Option<String> {
        match &self.data {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// True when the server rejected the call because the auth token is
    /// invalid or expired.
    pub fn is_session_expired(&self) -> bool {
        if self.code != -32602 && self.code != -32500 {
            return false;
        }
        let text = format!("{} {}", self.message, self.details().unwrap_or_default())
            .to_lowercase();
        SESSION_EXPIRED_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.code, self.message)?;
        if let Some(details) = self.details() {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ZabbixError {
    /// Network or HTTP failure reported by the transport. Never retried by the session.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not a valid JSON-RPC 2.0 response envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Login was rejected, or the token expired again right after a re-login.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The remote method ran and rejected the request.
    #[error(transparent)]
    Api(ApiError),

    /// A get-style call matched nothing.
    #[error("no results returned by {method}")]
    NotFound { method: String },

    /// The `result` payload did not fit the type the caller asked for.
    #[error("failed to decode result: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request params: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("token cache error: {0}")]
    Cache(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl std::error::Error for ApiError {}

impl From<ApiError> for ZabbixError {
    fn from(err: ApiError) -> Self {
        ZabbixError::Api(err)
    }
}

impl ZabbixError {
    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ZabbixError::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ZabbixError::NotFound { .. })
    }

    /// The remote error payload, if this is an API-level failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ZabbixError::Api(err) => Some(err),
            _ => None,
        }
    }
}
