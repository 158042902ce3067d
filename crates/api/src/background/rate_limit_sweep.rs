//! Periodic eviction of idle rate-limiter buckets.
//!
//! A bucket that has refilled completely carries no state worth keeping, so
//! it is dropped. Without this the per-IP table grows for the lifetime of
//! the process.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::middleware::rate_limit::ClientRateLimiter;

/// Run the sweep loop every `every` until `cancel` is triggered.
pub async fn run(limiter: Arc<ClientRateLimiter>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Rate limit sweep started");

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; there is nothing to sweep yet.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let before = limiter.tracked_clients();
                let after = limiter.sweep();
                tracing::debug!(before, after, "Rate limit sweep: evicted idle clients");
            }
        }
    }
}
