//! Relay error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::{CallError, Operation};

/// Errors that end a relay request. Rendered as plain text.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed body or a field that failed validation.
    #[error("{0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The gateway could not be reached or sent an unusable body.
    #[error("{0}")]
    BadGateway(String),

    /// The gateway rejected the call and explained why.
    #[error("WhatsApp API error: {message}")]
    Upstream { status: StatusCode, message: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            RelayError::Upstream { status, .. } => *status,
        }
    }

    /// Map a failed gateway call for `operation`.
    ///
    /// A gateway error status is passed through only when the body carries
    /// an `"error"` field; everything else is a 502.
    pub fn from_call(operation: Operation, err: &CallError) -> Self {
        if let (Some(status), Some(message)) = (err.status(), err.upstream_message()) {
            if let Ok(status) = StatusCode::from_u16(status) {
                return RelayError::Upstream { status, message };
            }
        }

        match operation {
            Operation::GetSettings => RelayError::BadGateway("Failed to communicate with WhatsApp API".into()),
            _ => RelayError::BadGateway(format!("API request failed: {}", err)),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(RelayError::BadGateway("x".into()).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_error_with_message_passes_status_through() {
        let err = CallError::Upstream {
            status: 401,
            body: r#"{"error":"Unauthorized"}"#.into(),
        };
        let relay = RelayError::from_call(Operation::GetState, &err);
        assert_eq!(relay.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(relay.to_string(), "WhatsApp API error: Unauthorized");
    }

    #[test]
    fn test_upstream_error_without_message_is_bad_gateway() {
        let err = CallError::Upstream {
            status: 500,
            body: "oops".into(),
        };
        let relay = RelayError::from_call(Operation::SendMessage, &err);
        assert_eq!(relay.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(relay.to_string(), "API request failed: api error: oops");

        let relay = RelayError::from_call(Operation::GetSettings, &err);
        assert_eq!(relay.to_string(), "Failed to communicate with WhatsApp API");
    }

    #[test]
    fn test_decode_error_is_bad_gateway() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = CallError::Decode { status: 200, source };
        let relay = RelayError::from_call(Operation::SendFile, &err);
        assert_eq!(relay.status_code(), StatusCode::BAD_GATEWAY);
    }
}
