use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// Per-key counter for one fixed window.
#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by client identifier.
///
/// Windows are non-overlapping and reset abruptly at the boundary, so a
/// client can burst up to `2 * max_requests` across a boundary. That is the
/// intended tradeoff of the fixed-window design, not a bug.
///
/// The store is process-wide and shared across request handlers; per-key
/// mutation happens under the dashmap entry guard, so concurrent bursts from
/// the same client never undercount.
#[derive(Debug, Clone, Default)]
pub struct FixedWindowLimiter {
    records: Arc<DashMap<String, WindowRecord>>,
}

impl FixedWindowLimiter {
    pub fn new() -> Self {
        FixedWindowLimiter {
            records: Arc::new(DashMap::new()),
        }
    }

    /// Counts this request against `key` and reports whether the key is over
    /// its budget for the current window.
    ///
    /// The first request of a window (or of a key) starts a fresh record with
    /// `count = 1` and is never limited.
    pub fn is_limited(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        let now = Instant::now();

        let mut record = self
            .records
            .entry(key.to_string())
            .or_insert(WindowRecord {
                count: 0,
                reset_at: now + window,
            });

        if now > record.reset_at {
            // Window rolled over: the stale record is replaced, not resumed.
            *record = WindowRecord {
                count: 1,
                reset_at: now + window,
            };
            return false;
        }

        record.count += 1;
        record.count > max_requests
    }

    /// Drops every record. Test/reset hook.
    pub fn clear(&self) {
        self.records.clear();
    }

    /// Removes records whose window expired more than `grace` ago. Keeps the
    /// store bounded in long-running processes; correctness never depends on
    /// it because `is_limited` replaces stale records on sight.
    pub fn sweep(&self, grace: Duration) -> usize {
        let now = Instant::now();
        let stale: Vec<String> = self
            .records
            .iter()
            .filter(|entry| now > entry.value().reset_at + grace)
            .map(|entry| entry.key().clone())
            .collect();

        let removed = stale.len();
        for key in stale {
            self.records.remove(&key);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn allows_up_to_max_requests() {
        let limiter = FixedWindowLimiter::new();
        for i in 1..=5 {
            assert!(
                !limiter.is_limited("203.0.113.7", 5, WINDOW),
                "request {i} should not be limited"
            );
        }
    }

    #[test]
    fn limits_request_past_the_maximum() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..5 {
            limiter.is_limited("203.0.113.7", 5, WINDOW);
        }
        assert!(limiter.is_limited("203.0.113.7", 5, WINDOW));
        assert!(limiter.is_limited("203.0.113.7", 5, WINDOW));
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..6 {
            limiter.is_limited("203.0.113.7", 5, WINDOW);
        }
        assert!(!limiter.is_limited("198.51.100.23", 5, WINDOW));
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let limiter = FixedWindowLimiter::new();
        let window = Duration::from_millis(20);

        for _ in 0..3 {
            limiter.is_limited("203.0.113.7", 2, window);
        }
        assert!(limiter.is_limited("203.0.113.7", 2, window));

        std::thread::sleep(Duration::from_millis(40));
        assert!(!limiter.is_limited("203.0.113.7", 2, window));
    }

    #[test]
    fn clear_drops_all_records() {
        let limiter = FixedWindowLimiter::new();
        for _ in 0..6 {
            limiter.is_limited("203.0.113.7", 5, WINDOW);
        }
        limiter.clear();
        assert!(limiter.is_empty());
        assert!(!limiter.is_limited("203.0.113.7", 5, WINDOW));
    }

    #[test]
    fn sweep_removes_only_long_expired_records() {
        let limiter = FixedWindowLimiter::new();
        let window = Duration::from_millis(10);

        limiter.is_limited("stale", 5, window);
        limiter.is_limited("fresh", 5, WINDOW);

        std::thread::sleep(Duration::from_millis(30));
        let removed = limiter.sweep(Duration::from_millis(5));

        assert_eq!(removed, 1);
        assert_eq!(limiter.len(), 1);
    }
}
