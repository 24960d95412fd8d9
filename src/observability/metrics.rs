//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay requests by operation, status
//! - `relay_request_duration_seconds` (histogram): end-to-end handler latency
//! - `relay_upstream_calls_total` (counter): gateway calls by operation, outcome
//! - `relay_upstream_duration_seconds` (histogram): gateway call latency
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! deployments without the exporter pay nothing.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::upstream::{CallError, CallResult, UpstreamResult};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished relay request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    metrics::counter!("relay_requests_total", "operation" => operation, "status" => status.to_string())
        .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record one gateway call and its outcome.
pub fn record_upstream_call(operation: &'static str, outcome: &CallResult<UpstreamResult>, start: Instant) {
    let result = outcome_label(outcome);
    metrics::counter!("relay_upstream_calls_total", "operation" => operation, "outcome" => result)
        .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

fn outcome_label(outcome: &CallResult<UpstreamResult>) -> &'static str {
    match outcome {
        Ok(_) => "ok",
        Err(e) if e.is_timeout() => "timeout",
        Err(CallError::Transport(_)) => "transport_error",
        Err(CallError::Upstream { .. }) => "upstream_error",
        Err(CallError::Decode { .. }) => "decode_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_outcome_labels() {
        let ok: CallResult<UpstreamResult> = Ok(UpstreamResult {
            body: Default::default(),
            status: 200,
            elapsed: Duration::ZERO,
        });
        assert_eq!(outcome_label(&ok), "ok");

        let upstream: CallResult<UpstreamResult> = Err(CallError::Upstream {
            status: 500,
            body: String::new(),
        });
        assert_eq!(outcome_label(&upstream), "upstream_error");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("get_state", 200, Instant::now());
    }
}
