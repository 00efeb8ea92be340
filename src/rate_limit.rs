use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

use crate::metrics::RATE_LIMIT_ENTRIES;

// Rate limit entry - tracks submissions per client identity
pub struct RateLimitEntry {
    pub count: u32,
    pub expires_at: Instant,
}

// Fixed window counter per key, expired entries count as absent.
// Local to this process: every running instance keeps its own table.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32, // max submissions allowed per window
    window: Duration,
}

impl RateLimiter {
    // A first request is always allowed, so at least one per window
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests: max_requests.max(1),
            window,
        }
    }

    // Far-future windows saturate instead of overflowing the clock
    fn expiry(&self, now: Instant) -> Instant {
        now.checked_add(self.window)
            .unwrap_or_else(|| now + Duration::from_secs(crate::config::MAX_RATE_WINDOW_SECS))
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    // Same as `check` with an explicit clock
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                expires_at: self.expiry(now),
            });

        // window expired..? start a new one
        if now > entry.expires_at {
            entry.count = 1;
            entry.expires_at = self.expiry(now);
            return true;
        }

        // at the limit, do not count further
        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }

    pub fn prune_expired(&self) -> usize {
        self.prune_expired_at(Instant::now())
    }

    // Drop entries whose window elapsed, returns how many went away
    pub fn prune_expired_at(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now <= entry.expires_at);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Sweeper - keeps the table from growing with one-off callers
pub async fn sweeper(rate_limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    debug!(interval = ?every, "Rate limit sweeper started");

    loop {
        interval.tick().await;

        let removed = rate_limiter.prune_expired();
        RATE_LIMIT_ENTRIES.set(rate_limiter.len() as f64);

        if removed > 0 {
            debug!(removed, remaining = rate_limiter.len(), "Pruned expired rate limit entries");
        }
    }
}
