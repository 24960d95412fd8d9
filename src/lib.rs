//! Browser-facing relay for a WhatsApp-gateway style messaging API.
//!
//! The server renders a small form, accepts the form's JSON posts on
//! `/api/*`, forwards each one to the gateway and returns the gateway's
//! answer together with a redacted echo of what was sent.

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
