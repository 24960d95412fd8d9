//! Outbound request/result types and the call error taxonomy.

use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Untyped JSON object returned by the gateway.
///
/// The gateway owns its schema, so bodies are relayed as-is.
pub type JsonObject = Map<String, Value>;

/// HTTP method for an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMethod {
    Get,
    Post,
}

impl CallMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallMethod::Get => "GET",
            CallMethod::Post => "POST",
        }
    }
}

/// A single call to the gateway. Built per request and dropped afterwards.
///
/// The last path segment of `url` is the API token and never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct OutboundRequest {
    pub method: CallMethod,
    pub url: String,
    pub payload: Option<Value>,
}

impl OutboundRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: CallMethod::Get,
            url: url.into(),
            payload: None,
        }
    }

    pub fn post_json(url: impl Into<String>, payload: Value) -> Self {
        Self {
            method: CallMethod::Post,
            url: url.into(),
            payload: Some(payload),
        }
    }
}

impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let url = match self.url.rfind('/') {
            Some(idx) => format!("{}/<redacted>", &self.url[..idx]),
            None => "<redacted>".to_string(),
        };
        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("url", &url)
            .field("payload", &self.payload)
            .finish()
    }
}

/// Decoded gateway response.
#[derive(Debug, Clone)]
pub struct UpstreamResult {
    pub body: JsonObject,
    pub status: u16,
    pub elapsed: Duration,
}

/// Errors that can occur during an outbound call.
#[derive(Debug, Error)]
pub enum CallError {
    /// DNS, connect, TLS, or timeout failure. The URL is stripped from the
    /// inner error because it carries the API token.
    #[error("request execution failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The gateway answered with status >= 400.
    #[error("api error: {body}")]
    Upstream { status: u16, body: String },

    /// The gateway answered successfully but the body was not a JSON object.
    #[error("json decode failed: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl CallError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        CallError::Transport(err.without_url())
    }

    /// Whether the call gave up because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CallError::Transport(e) if e.is_timeout())
    }

    /// Status code received from the gateway, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Transport(_) => None,
            CallError::Upstream { status, .. } | CallError::Decode { status, .. } => Some(*status),
        }
    }

    /// The `"error"` field of an error body, when the gateway sent one.
    pub fn upstream_message(&self) -> Option<String> {
        let CallError::Upstream { body, .. } = self else {
            return None;
        };
        let parsed: JsonObject = serde_json::from_str(body).ok()?;
        match parsed.get("error")? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Result type for outbound calls.
pub type CallResult<T> = Result<T, CallError>;
