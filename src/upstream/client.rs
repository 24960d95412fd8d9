//! Outbound HTTP client for the messaging gateway.
//!
//! # Responsibilities
//! - Execute one GET or POST+JSON call per relay request
//! - Enforce the configured call timeout
//! - Decode the body as a JSON object
//! - Classify the outcome (success, gateway error, transport error)
//!
//! # Design Decisions
//! - Two long-lived clients: GET goes through a pooled client with
//!   connect/idle tuning, POST through a plain client with the same
//!   overall timeout
//! - No retries and no caching; every failure is terminal for the call
//! - URLs are never logged because they embed the API token

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use std::time::Instant;

use crate::config::UpstreamConfig;
use crate::upstream::types::{CallError, CallMethod, CallResult, JsonObject, OutboundRequest, UpstreamResult};

const APPLICATION_JSON: &str = "application/json";

/// Shared handle to the gateway clients. Cheap to clone.
#[derive(Clone)]
pub struct UpstreamClient {
    get_client: Client,
    post_client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Build both clients from configuration.
    pub fn new(config: UpstreamConfig) -> reqwest::Result<Self> {
        let get_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout())
            .build()?;

        let post_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            get_client,
            post_client,
            config,
        })
    }

    /// Gateway configuration the clients were built from.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Execute a single outbound call.
    pub async fn call(&self, request: OutboundRequest) -> CallResult<UpstreamResult> {
        let start = Instant::now();

        let builder = match request.method {
            CallMethod::Get => self
                .get_client
                .get(&request.url)
                .header(ACCEPT, APPLICATION_JSON)
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .header(ACCEPT_LANGUAGE, "en-US"),
            CallMethod::Post => {
                let builder = self.post_client.post(&request.url).header(ACCEPT, APPLICATION_JSON);
                match &request.payload {
                    Some(payload) => builder.json(payload),
                    None => builder.header(CONTENT_TYPE, APPLICATION_JSON),
                }
            }
        };

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    method = request.method.as_str(),
                    timeout = e.is_timeout(),
                    elapsed = ?start.elapsed(),
                    "Upstream call failed before a response arrived"
                );
                return Err(CallError::transport(e));
            }
        };

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(CallError::transport)?;
        let elapsed = start.elapsed();

        tracing::debug!(
            method = request.method.as_str(),
            status,
            elapsed = ?elapsed,
            bytes = bytes.len(),
            "Upstream call completed"
        );

        if status >= 400 {
            return Err(CallError::Upstream {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let body: JsonObject =
            serde_json::from_slice(&bytes).map_err(|source| CallError::Decode { status, source })?;

        Ok(UpstreamResult { body, status, elapsed })
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("settings_base_url", &self.config.settings_base_url)
            .field("api_base_url", &self.config.api_base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
