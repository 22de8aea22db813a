//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: handlers that need it take a
//! [`auth::RequireSessionToken`] argument, so `/health` stays public.

pub mod auth;
pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
