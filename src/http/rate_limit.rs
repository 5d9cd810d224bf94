//! Throttling between upstream calls
//!
//! Every call, paginated or not, is followed by one [`Throttle::pause`].
//! The default policy sleeps a fixed 1000ms; a governor token bucket and a
//! no-op policy are also available.

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Default delay after each call
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Pacing policy applied after each upstream call
#[async_trait]
pub trait Throttle: Send + Sync {
    /// Wait until the next call may be issued
    async fn pause(&self);
}

// ============================================================================
// Fixed Interval
// ============================================================================

/// Sleeps a fixed duration on every pause
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::from_millis(DEFAULT_INTERVAL_MS)
    }
}

#[async_trait]
impl Throttle for FixedInterval {
    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

// ============================================================================
// No Throttle
// ============================================================================

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self) {}
}

// ============================================================================
// Token Bucket
// ============================================================================

/// Configuration for token bucket rate limiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1,
            burst_size: 1,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    ///
    /// Zero values are clamped to one.
    pub fn new(config: &RateLimiterConfig) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

#[async_trait]
impl Throttle for RateLimiter {
    async fn pause(&self) {
        self.wait().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

// ============================================================================
// Config
// ============================================================================

/// Serializable choice of throttle policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThrottleConfig {
    /// Sleep a fixed interval after every call
    FixedInterval {
        #[serde(default = "default_interval_ms")]
        interval_ms: u64,
    },
    /// Governor token bucket
    TokenBucket(RateLimiterConfig),
    /// No pacing at all
    None,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::FixedInterval {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl ThrottleConfig {
    /// Build the configured policy
    pub fn build(&self) -> Arc<dyn Throttle> {
        match self {
            ThrottleConfig::FixedInterval { interval_ms } => {
                Arc::new(FixedInterval::from_millis(*interval_ms))
            }
            ThrottleConfig::TokenBucket(config) => Arc::new(RateLimiter::new(config)),
            ThrottleConfig::None => Arc::new(NoThrottle),
        }
    }
}
