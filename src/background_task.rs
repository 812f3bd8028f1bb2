use std::time::Duration;

use tokio::time::interval;

use crate::limiter::rate_limiter::FixedWindowLimiter;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops rate-limit records whose window expired long ago.
/// Limiting stays correct without this (stale records are replaced on
/// access); the sweep only reclaims memory for clients that never return.
pub async fn start_sweep_task(limiter: FixedWindowLimiter, window: Duration) {
    let mut interval = interval(SWEEP_INTERVAL);
    let grace = window * 10;

    loop {
        interval.tick().await;

        let removed = limiter.sweep(grace);
        if removed > 0 {
            tracing::debug!("Swept {} stale rate-limit records", removed);
        }
    }
}
