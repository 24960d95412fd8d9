//! Relay endpoint handlers.
//!
//! Every handler runs the same pipeline: decode → validate → build the
//! gateway URL and payload → call → shape the response. Nothing is shared
//! between requests except the outbound client pool.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::time::Instant;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::request::{decode_body, Credentials, InstanceRequest, SendFileRequest, SendMessageRequest};
use crate::relay::response::{RelayResponse, RequestEcho, SettingsResponse};
use crate::upstream::{endpoint_url, Operation, OutboundRequest, UpstreamResult};

/// `POST /api/get-settings`
pub async fn get_settings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SettingsResponse>, RelayError> {
    let start = Instant::now();
    observe(Operation::GetSettings, start, relay_settings(&state, &body).await)
}

/// `POST /api/get-state`
pub async fn get_state(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RelayResponse>, RelayError> {
    let start = Instant::now();
    observe(Operation::GetState, start, relay_state(&state, &body).await)
}

/// `POST /api/send-message`
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RelayResponse>, RelayError> {
    let start = Instant::now();
    observe(Operation::SendMessage, start, relay_message(&state, &body).await)
}

/// `POST /api/send-file`
pub async fn send_file(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RelayResponse>, RelayError> {
    let start = Instant::now();
    observe(Operation::SendFile, start, relay_file(&state, &body).await)
}

async fn relay_settings(state: &AppState, body: &[u8]) -> Result<Json<SettingsResponse>, RelayError> {
    let op = Operation::GetSettings;
    let req: InstanceRequest = decode_body(body)?;
    let url = gateway_url(state, op, &req.credentials);

    let result = relay_call(state, op, OutboundRequest::get(url.clone())).await?;

    // A non-200 success status can still carry an error report.
    if result.status != 200 {
        if let Some(error) = result.body.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(RelayError::Upstream {
                status: StatusCode::from_u16(result.status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            });
        }
    }

    Ok(Json(SettingsResponse::new(url, result)))
}

async fn relay_state(state: &AppState, body: &[u8]) -> Result<Json<RelayResponse>, RelayError> {
    let op = Operation::GetState;
    let req: InstanceRequest = decode_body(body)?;
    let url = gateway_url(state, op, &req.credentials);

    let result = relay_call(state, op, OutboundRequest::get(url.clone())).await?;
    let echo = RequestEcho::new(&req.credentials);

    Ok(Json(RelayResponse::new(url, echo, result)))
}

async fn relay_message(state: &AppState, body: &[u8]) -> Result<Json<RelayResponse>, RelayError> {
    let op = Operation::SendMessage;
    let req: SendMessageRequest = decode_body(body)?;
    req.validate()?;
    let url = gateway_url(state, op, &req.credentials);

    let result = relay_call(state, op, OutboundRequest::post_json(url.clone(), req.payload())).await?;
    let echo = RequestEcho::new(&req.credentials)
        .with_phone_number(&req.phone_number)
        .with_message(&req.message_text);

    Ok(Json(RelayResponse::new(url, echo, result)))
}

async fn relay_file(state: &AppState, body: &[u8]) -> Result<Json<RelayResponse>, RelayError> {
    let op = Operation::SendFile;
    let req: SendFileRequest = decode_body(body)?;
    req.validate()?;
    let url = gateway_url(state, op, &req.credentials);

    let result = relay_call(state, op, OutboundRequest::post_json(url.clone(), req.payload())).await?;
    let echo = RequestEcho::new(&req.credentials)
        .with_phone_number(&req.phone_number)
        .with_file_url(&req.file_url);

    Ok(Json(RelayResponse::new(url, echo, result)))
}

/// Fallback for any non-POST method on an `/api/*` route.
pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

fn gateway_url(state: &AppState, op: Operation, credentials: &Credentials) -> String {
    let config = state.upstream.config();
    endpoint_url(
        op.base_url(config),
        op,
        &credentials.id_instance,
        &credentials.api_token_instance,
    )
}

async fn relay_call(
    state: &AppState,
    op: Operation,
    request: OutboundRequest,
) -> Result<UpstreamResult, RelayError> {
    let start = Instant::now();
    let outcome = state.upstream.call(request).await;
    metrics::record_upstream_call(op.label(), &outcome, start);

    outcome.map_err(|e| {
        tracing::error!(
            operation = op.label(),
            error = %e,
            timeout = e.is_timeout(),
            "API request failed"
        );
        RelayError::from_call(op, &e)
    })
}

fn observe<T>(op: Operation, start: Instant, outcome: Result<T, RelayError>) -> Result<T, RelayError> {
    let status = match &outcome {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    };
    metrics::record_request(op.label(), status, start);

    if let Err(e) = &outcome {
        tracing::debug!(operation = op.label(), status, error = %e, "Relay request rejected");
    }
    outcome
}
