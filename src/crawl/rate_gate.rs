// src/crawl/rate_gate.rs
// =============================================================================
// A keyed, fail-fast rate limiter.
//
// Each key gets at most `limit` acquisitions inside any rolling window. An
// acquisition over the limit is refused immediately (no waiting), and the
// crawler treats the refusal like a failed fetch for that URL.
//
// The crawler keys the gate by the URL being fetched. Distinct URLs never
// block each other, so this is NOT an aggregate throttle on the target site:
// it only stops the same URL being fetched twice inside one window. Use
// CrawlerConfig::politeness_delay_ms for an actual pause between requests.
// =============================================================================

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::CrawlError;

#[derive(Debug)]
pub struct RateGate {
    limit: usize,
    window: Duration,
    // Timestamps of recent acquisitions, oldest first, per key
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateGate {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit.max(1) as usize,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Takes a slot for `key`, or fails with `RateLimitExceeded`.
    pub fn acquire(&self, key: &str) -> Result<(), CrawlError> {
        let now = Instant::now();

        // A poisoned lock only means another crawl task panicked mid-update;
        // the map itself is still usable.
        let mut hits = self.hits.lock().unwrap_or_else(|p| p.into_inner());
        let recent = hits.entry(key.to_string()).or_default();

        while let Some(&oldest) = recent.front() {
            if now.duration_since(oldest) >= self.window {
                recent.pop_front();
            } else {
                break;
            }
        }

        if recent.len() >= self.limit {
            return Err(CrawlError::RateLimitExceeded {
                key: key.to_string(),
            });
        }

        recent.push_back(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_second_hit_on_same_key_is_refused() {
        let gate = RateGate::new(1, Duration::from_secs(1));
        assert!(gate.acquire("https://example.com/a").is_ok());

        let err = gate.acquire("https://example.com/a").unwrap_err();
        assert!(matches!(err, CrawlError::RateLimitExceeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_rolls_over() {
        let gate = RateGate::new(1, Duration::from_secs(1));
        assert!(gate.acquire("k").is_ok());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(gate.acquire("k").is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(gate.acquire("k").is_ok());
    }

    // Keying by URL means many different pages on the same host all pass
    // inside a single window: the gate does not throttle the site as a whole.
    #[tokio::test(start_paused = true)]
    async fn test_distinct_urls_do_not_throttle_each_other() {
        let gate = RateGate::new(1, Duration::from_secs(1));
        for i in 0..20 {
            let url = format!("https://example.com/page-{}", i);
            assert!(gate.acquire(&url).is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_higher_limit() {
        let gate = RateGate::new(3, Duration::from_secs(1));
        assert!(gate.acquire("k").is_ok());
        assert!(gate.acquire("k").is_ok());
        assert!(gate.acquire("k").is_ok());
        assert!(gate.acquire("k").is_err());
    }
}
