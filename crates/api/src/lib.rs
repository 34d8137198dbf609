//! HTTP API layer for corkboard-rs.
//!
//! This crate provides the REST API and real-time streaming:
//!
//! - **Endpoints**: Board feed, anonymous submissions, admin dashboard
//! - **Extractors**: Authentication and admin role enforcement
//! - **Middleware**: Token resolution, CORS, request tracing
//! - **Streaming**: Server-Sent Events for board updates
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod sse;

#[cfg(test)]
pub(crate) mod test_support;

pub use endpoints::router;
pub use sse::{SseBroadcaster, SseEvent};
