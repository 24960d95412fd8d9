//! Messaging gateway access.
//!
//! # Data Flow
//! ```text
//! relay handler
//!     → endpoint.rs (operation → URL with escaped credentials)
//!     → types.rs (OutboundRequest: method, url, payload)
//!     → client.rs (execute, time, decode, classify)
//!     → UpstreamResult | CallError
//! ```

pub mod client;
pub mod endpoint;
pub mod types;

pub use client::UpstreamClient;
pub use endpoint::{endpoint_url, Operation};
pub use types::{CallError, CallMethod, CallResult, JsonObject, OutboundRequest, UpstreamResult};
