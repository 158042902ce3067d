//! HTTP middleware.
//!
//! - [`rate_limit`] -- per-client-IP token buckets (429 when exhausted).
//! - [`metrics`] -- request counters and latency histograms.
//! - [`security_headers`] -- static hardening headers on every response.

pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
