//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route table (page, assets, relay endpoints, health)
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Own the long-lived outbound client shared by all handlers
//! - Serve on a listener until shutdown is signalled

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::assets;
use crate::http::request::{make_span, MakeRequestUuidV4};
use crate::relay::handlers;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> reqwest::Result<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())?;
        let state = AppState { upstream };

        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// The route table, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RelayConfig, state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/get-settings",
            post(handlers::get_settings).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/get-state",
            post(handlers::get_state).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/send-message",
            post(handlers::send_message).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/send-file",
            post(handlers::send_file).fallback(handlers::method_not_allowed),
        );

    Router::new()
        .route("/", get(assets::index))
        .route("/static/{*path}", get(assets::static_asset))
        .route("/healthz", get(health))
        .merge(api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(make_span::<Body>))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /healthz`
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
