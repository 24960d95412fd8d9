//! Inbound request bodies and the payloads derived from them.
//!
//! Missing fields decode as empty strings so that validation, not the
//! decoder, decides what is acceptable.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::relay::error::RelayError;

/// Minimum accepted phone number length, in bytes.
pub const MIN_PHONE_LEN: usize = 11;

/// Suffix turning a phone number into a personal chat id.
pub const CHAT_ID_SUFFIX: &str = "@c.us";

/// Instance id and API token, supplied with every request.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credentials {
    pub id_instance: String,
    pub api_token_instance: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id_instance", &self.id_instance)
            .field("api_token_instance", &"<redacted>")
            .finish()
    }
}

/// Body of `get-settings` and `get-state`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
}

/// Body of `send-message`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub phone_number: String,
    pub message_text: String,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        validate_phone(&self.phone_number)
    }

    /// JSON body for the gateway's `sendMessage`.
    pub fn payload(&self) -> Value {
        json!({
            "chatId": chat_id(&self.phone_number),
            "message": self.message_text,
        })
    }
}

/// Body of `send-file`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SendFileRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub phone_number: String,
    pub file_url: String,
}

impl SendFileRequest {
    pub fn validate(&self) -> Result<(), RelayError> {
        validate_phone(&self.phone_number)?;
        validate_file_url(&self.file_url)
    }

    /// JSON body for the gateway's `sendFileByUrl`.
    pub fn payload(&self) -> Value {
        json!({
            "chatId": chat_id(&self.phone_number),
            "urlFile": self.file_url,
            "fileName": file_name(&self.file_url),
        })
    }
}

/// Decode the first JSON value in `body`. Trailing bytes are ignored.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RelayError> {
    let mut de = serde_json::Deserializer::from_slice(body);
    T::deserialize(&mut de).map_err(|e| RelayError::BadRequest(format!("Invalid request body: {}", e)))
}

pub fn chat_id(phone_number: &str) -> String {
    format!("{}{}", phone_number, CHAT_ID_SUFFIX)
}

/// Last non-empty path segment of `url`, ignoring query and fragment.
///
/// The scheme and authority are never a segment. Returns an empty string
/// when the path has no such segment.
pub fn file_name(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or_default();
    let clean = without_query.split('#').next().unwrap_or_default();
    let path = match clean.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |start| &rest[start..]),
        None => clean,
    };
    path.rsplit('/').find(|part| !part.is_empty()).unwrap_or_default()
}

fn validate_phone(phone_number: &str) -> Result<(), RelayError> {
    if phone_number.len() < MIN_PHONE_LEN {
        return Err(RelayError::BadRequest("Phone number too short".into()));
    }
    Ok(())
}

fn validate_file_url(file_url: &str) -> Result<(), RelayError> {
    if file_url.is_empty() {
        return Err(RelayError::BadRequest("File URL is required".into()));
    }
    url::Url::parse(file_url).map_err(|_| RelayError::BadRequest("Invalid file URL".into()))?;
    Ok(())
}
