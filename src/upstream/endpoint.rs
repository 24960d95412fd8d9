//! Gateway endpoint construction.
//!
//! Every gateway operation lives at
//! `{base}/waInstance{idInstance}/{method}/{apiTokenInstance}`, with both
//! credentials escaped as single path segments. Every byte outside the
//! unreserved set is escaped, including sub-delimiters such as `:` and `@`.

use crate::config::UpstreamConfig;

/// Gateway operations the relay knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSettings,
    GetState,
    SendMessage,
    SendFile,
}

impl Operation {
    /// Method name as it appears in the gateway path.
    pub fn method_name(&self) -> &'static str {
        match self {
            Operation::GetSettings => "getSettings",
            Operation::GetState => "getStateInstance",
            Operation::SendMessage => "sendMessage",
            Operation::SendFile => "sendFileByUrl",
        }
    }

    /// Short label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::GetSettings => "get_settings",
            Operation::GetState => "get_state",
            Operation::SendMessage => "send_message",
            Operation::SendFile => "send_file",
        }
    }

    /// Base URL serving this operation.
    pub fn base_url<'a>(&self, config: &'a UpstreamConfig) -> &'a str {
        match self {
            Operation::GetSettings => &config.settings_base_url,
            _ => &config.api_base_url,
        }
    }
}

/// Build the full gateway URL for `operation`.
pub fn endpoint_url(base_url: &str, operation: Operation, id_instance: &str, api_token: &str) -> String {
    format!(
        "{}/waInstance{}/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id_instance),
        operation.method_name(),
        urlencoding::encode(api_token),
    )
}
