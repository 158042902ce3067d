//! Static security headers added to every response.

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const CSP: &str = "default-src 'self'; content-src *; font-src *; \
    script-src-elem * 'unsafe-inline'; img-src * data; style-src * 'unsafe-inline'";

const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

const PERMISSIONS_POLICY: &str = "geolocation=(),midi=(),sync-xhr=(),microphone=(),\
    magnetometer=(),gyroscope=(),fullscreen=(self),payment=()";

/// Header name/value pairs applied by [`apply`].
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("content-security-policy", CSP),
    ("strict-transport-security", HSTS),
    ("referrer-policy", "strict-origin"),
    ("x-content-type-options", "nosniff"),
    ("permissions-policy", PERMISSIONS_POLICY),
];

/// Wrap `router` so every response carries the security headers.
pub fn apply<S>(mut router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    for &(name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    router
}
