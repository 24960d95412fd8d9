//! Relay response shaping and secret masking.

use serde::Serialize;
use std::time::Duration;

use crate::relay::request::Credentials;
use crate::upstream::{JsonObject, UpstreamResult};

/// Replacement shown wherever the API token would be echoed.
pub const MASK: &str = "••••••••";

/// Echo of the inbound request fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub id_instance: String,
    pub api_token_instance: String,
}

impl RequestEcho {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            phone_number: None,
            message: None,
            file_url: None,
            id_instance: credentials.id_instance.clone(),
            api_token_instance: credentials.api_token_instance.clone(),
        }
    }

    pub fn with_phone_number(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_file_url(mut self, file_url: &str) -> Self {
        self.file_url = Some(file_url.to_string());
        self
    }

    /// The same echo with the API token replaced by [`MASK`].
    pub fn redacted(self) -> Self {
        Self {
            api_token_instance: MASK.to_string(),
            ..self
        }
    }
}

/// Response of `get-settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub url: String,
    pub response: JsonObject,
    pub status: u16,
    pub time: String,
}

impl SettingsResponse {
    pub fn new(url: String, result: UpstreamResult) -> Self {
        Self {
            url,
            response: result.body,
            status: 200,
            time: timestamp(),
        }
    }
}

/// Response of `get-state`, `send-message` and `send-file`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub url: String,
    pub request_body: RequestEcho,
    pub response: JsonObject,
    pub status_code: u16,
    pub processed_at: String,
    pub request_time: String,
}

impl RelayResponse {
    /// Build the response. The echo is always redacted here.
    pub fn new(url: String, echo: RequestEcho, result: UpstreamResult) -> Self {
        Self {
            url,
            request_body: echo.redacted(),
            response: result.body,
            status_code: result.status,
            processed_at: timestamp(),
            request_time: format_elapsed(result.elapsed),
        }
    }
}

/// Current local time in RFC 3339 with second precision.
pub fn timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Human-readable duration such as `152.3ms` or `1.5s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}
