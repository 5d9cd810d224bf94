//! HTTP module
//!
//! Issues single authenticated requests and paces consecutive calls.
//!
//! # Features
//!
//! - **Transport**: pluggable [`Transport`] with a reqwest-backed default
//! - **Request Executor**: bearer auth, JSON headers, status check, JSON parse
//! - **Throttling**: fixed-interval sleep or governor token bucket between calls

mod executor;
mod rate_limit;
mod transport;

pub use executor::RequestExecutor;
pub use rate_limit::{
    FixedInterval, NoThrottle, RateLimiter, RateLimiterConfig, Throttle, ThrottleConfig,
    DEFAULT_INTERVAL_MS,
};
pub use transport::{
    HttpClientConfig, ReqwestTransport, Transport, TransportRequest, TransportResponse,
};
