//! Client-side request pacing
//!
//! The REST API enforces a concurrency and request quota per account and
//! answers `429 Too Many Requests` once it is exceeded. A [`RateLimiter`]
//! keeps one client under that quota before the server has to push back.
//! Every request of a client draws from the same bucket: each page fetch of
//! a long `list`, and every fetch, create, update or remove in between.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Account-wide request budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Sustained requests per second for the whole account
    pub requests_per_second: u32,
    /// Requests allowed back to back before pacing starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    /// Below the default per-account quota
    fn default() -> Self {
        Self {
            requests_per_second: 25,
            burst_size: 25,
        }
    }
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Budget for an account with a raised quota; burst equals the rate
    pub fn per_account(requests_per_second: u32) -> Self {
        Self::new(requests_per_second, requests_per_second)
    }
}

/// Token bucket shared by clones, so all domains of one client pace together
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Zero values are raised to one request per second and a burst of one.
    pub fn new(config: &RateLimiterConfig) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait for the next request slot
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a slot if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_account_budget() {
        let config = RateLimiterConfig::default();
        assert_eq!(config, RateLimiterConfig::per_account(25));
    }

    #[tokio::test]
    async fn test_burst_then_paced() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(10, 3));

        for _ in 0..3 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_clones_share_one_account_bucket() {
        let pages = RateLimiter::new(&RateLimiterConfig::per_account(2));
        let single_calls = pages.clone();

        assert!(pages.try_acquire());
        assert!(single_calls.try_acquire());
        // Both handles drained the same two-request burst
        assert!(!pages.try_acquire());
        assert!(!single_calls.try_acquire());
    }

    #[tokio::test]
    async fn test_zero_budget_still_admits_requests() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        assert!(limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_wait_returns_once_slot_frees() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_account(100));
        assert!(limiter.try_acquire());

        let waited = tokio::time::timeout(Duration::from_secs(1), limiter.wait()).await;
        assert!(waited.is_ok());
    }
}
