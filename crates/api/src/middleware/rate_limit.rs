//! Per-client-IP token-bucket rate limiting.
//!
//! [`ClientRateLimiter`] is created once at startup and shared through
//! [`AppState`]. [`enforce`] is mounted as a route layer on the API tree;
//! health probes and metrics are not limited.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use axum::extract::{ConnectInfo, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::RateLimitConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Keyed limiter holding one bucket per client IP.
pub struct ClientRateLimiter {
    inner: DefaultKeyedRateLimiter<IpAddr>,
}

impl ClientRateLimiter {
    /// Build a limiter from config. Zero values are raised to one.
    pub fn new(config: &RateLimitConfig) -> Self {
        let per_second = NonZeroU32::new(config.per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);

        Self {
            inner: RateLimiter::keyed(quota),
        }
    }

    /// Take one token from the client's bucket. `false` means over the limit.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.inner.check_key(&ip).is_ok()
    }

    /// Drop buckets that have refilled completely. Returns the tracked client
    /// count after the sweep.
    pub fn sweep(&self) -> usize {
        self.inner.retain_recent();
        self.inner.shrink_to_fit();
        self.inner.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.inner.len()
    }
}

/// Middleware rejecting requests whose client IP is over budget.
pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();
    let Some(ip) = client_ip(&mut parts).await else {
        return AppError::BadRequest("could not determine client IP".to_string()).into_response();
    };

    if !state.rate_limiter.check(ip) {
        tracing::debug!(client_ip = %ip, "Rate limit exceeded");
        return AppError::RateLimited.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Resolve the client IP: first `X-Forwarded-For` entry, else the peer address.
pub async fn client_ip(parts: &mut Parts) -> Option<IpAddr> {
    if let Some(ip) = forwarded_for(&parts.headers) {
        return Some(ip);
    }

    ConnectInfo::<SocketAddr>::from_request_parts(parts, &())
        .await
        .ok()
        .map(|ConnectInfo(addr)| addr.ip())
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;

    use super::*;

    fn limiter(per_second: u32, burst: u32) -> ClientRateLimiter {
        ClientRateLimiter::new(&RateLimitConfig {
            per_second,
            burst,
            sweep_secs: 60,
        })
    }

    #[test]
    fn burst_is_allowed_then_limited() {
        let limiter = limiter(1, 5);
        let ip: IpAddr = "203.0.113.7".parse().unwrap();
        for _ in 0..5 {
            assert!(limiter.check(ip));
        }
        assert!(!limiter.check(ip));
    }

    #[test]
    fn buckets_are_per_ip() {
        let limiter = limiter(1, 1);
        let a: IpAddr = "203.0.113.1".parse().unwrap();
        let b: IpAddr = "203.0.113.2".parse().unwrap();
        assert!(limiter.check(a));
        assert!(!limiter.check(a));
        assert!(limiter.check(b));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn zero_quota_is_raised_to_one() {
        let limiter = limiter(0, 0);
        let ip: IpAddr = "198.51.100.1".parse().unwrap();
        assert!(limiter.check(ip));
        assert!(!limiter.check(ip));
    }

    fn parts(req: Request) -> Parts {
        req.into_parts().0
    }

    #[tokio::test]
    async fn forwarded_for_takes_first_entry() {
        let req = Request::builder()
            .header("x-forwarded-for", "198.51.100.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        let mut parts = parts(req);
        assert_eq!(client_ip(&mut parts).await, Some("198.51.100.9".parse().unwrap()));
    }

    #[tokio::test]
    async fn peer_address_is_fallback() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        let addr: SocketAddr = "192.0.2.4:5555".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        let mut parts = parts(req);
        assert_eq!(client_ip(&mut parts).await, Some(addr.ip()));
    }

    #[tokio::test]
    async fn mock_peer_address_is_resolved_by_extractor() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        let addr: SocketAddr = "192.0.2.8:4000".parse().unwrap();
        req.extensions_mut().insert(MockConnectInfo(addr));
        let mut parts = parts(req);
        assert_eq!(client_ip(&mut parts).await, Some(addr.ip()));
    }

    #[tokio::test]
    async fn unknown_client_yields_none() {
        let req = Request::builder()
            .header("x-forwarded-for", "not-an-ip")
            .body(Body::empty())
            .unwrap();
        let mut parts = parts(req);
        assert_eq!(client_ip(&mut parts).await, None);
    }
}
