use std::fmt::Display;
use std::str::FromStr;

/// Default CORS allow-list: local development plus the public front ends.
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:8090,https://steamshark.app,https://www.steamshark.app";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8090`).
    pub port: u16,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `15`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Per-client rate limiting.
    pub rate_limit: RateLimitConfig,
}

/// Token-bucket parameters applied per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second (default: `1`).
    pub per_second: u32,
    /// Bucket size (default: `5`).
    pub burst: u32,
    /// Idle-entry sweep interval in seconds (default: `60`).
    pub sweep_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst: 5,
            sweep_secs: 60,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                    |
    /// |-------------------------|--------------------------------------------|
    /// | `APP_ENV`               | `development`                              |
    /// | `HOST`                  | `0.0.0.0`                                  |
    /// | `PORT`                  | `8090`                                     |
    /// | `DB_MAX_CONNECTIONS`    | `20`                                       |
    /// | `CORS_ORIGINS`          | localhost:8090 and the steamshark.app hosts |
    /// | `REQUEST_TIMEOUT_SECS`  | `15`                                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                                       |
    /// | `RATE_LIMIT_PER_SECOND` | `1`                                        |
    /// | `RATE_LIMIT_BURST`      | `5`                                        |
    /// | `RATE_LIMIT_SWEEP_SECS` | `60`                                       |
    ///
    /// Panics on malformed numeric values.
    pub fn from_env() -> Self {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        let rate_limit = RateLimitConfig {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 1),
            burst: env_or("RATE_LIMIT_BURST", 5),
            sweep_secs: env_or("RATE_LIMIT_SWEEP_SECS", 60),
        };

        Self {
            app_env,
            host,
            port: env_or("PORT", 8090),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 15),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 10),
            rate_limit,
        }
    }

    /// Whether logs should be emitted as JSON.
    pub fn is_production(&self) -> bool {
        matches!(self.app_env.as_str(), "production" | "prod")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid number: {e}")),
        Err(_) => default,
    }
}
