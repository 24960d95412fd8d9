//! Relay subsystem: the `/api/*` endpoints.
//!
//! # Data Flow
//! ```text
//! browser form (JSON body)
//!     → request.rs (decode, validate, build payload)
//!     → upstream (gateway URL, outbound call)
//!     → response.rs (reshape, mask token, timestamps)
//!     → JSON back to the browser
//! ```
//!
//! Failures at any step become a `RelayError` (error.rs) rendered as plain
//! text with the matching status code.

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;

pub use error::RelayError;
pub use request::{file_name, Credentials};
pub use response::{RelayResponse, RequestEcho, SettingsResponse, MASK};
