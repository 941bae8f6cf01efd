//! Minimum-interval request pacing.
//!
//! The limiter spaces request starts at least `60 / requests_per_minute`
//! seconds apart. It keeps one timestamp, the start of the previous request,
//! and sleeps on tokio's clock until the interval has passed.

use crate::{PacingConfig, RateLimitError, RateLimitErrorKind, RateLimitResult};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, trace};

const ONE_MINUTE: Duration = Duration::from_secs(60);

/// Paces sequential requests to a requests-per-minute budget.
///
/// Pacing takes `&mut self`: one limiter serves one sequential caller. Callers
/// that need to share a budget must wrap the limiter in their own mutex.
///
/// # Example
///
/// ```
/// use lectern_rate_limit::RateLimiter;
/// use std::time::Duration;
///
/// let limiter = RateLimiter::new(20).unwrap();
/// assert_eq!(limiter.min_interval(), Duration::from_secs(3));
/// assert!(RateLimiter::new(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    requests_per_minute: NonZeroU32,
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter for the given requests-per-minute budget.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::InvalidRate`] when the budget is zero.
    #[instrument]
    pub fn new(requests_per_minute: u32) -> RateLimitResult<Self> {
        let rpm = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
            RateLimitError::new(RateLimitErrorKind::InvalidRate(requests_per_minute))
        })?;
        let min_interval = ONE_MINUTE / rpm.get();
        debug!(?min_interval, "Created rate limiter");
        Ok(Self {
            requests_per_minute: rpm,
            min_interval,
            last_request: None,
        })
    }

    /// Create a limiter from the `[rate_limit]` configuration section.
    pub fn from_config(config: &PacingConfig) -> RateLimitResult<Self> {
        Self::new(config.requests_per_minute)
    }

    /// The configured budget.
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute.get()
    }

    /// Minimum spacing between request starts.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Start of the most recent paced request, if any.
    pub fn last_request(&self) -> Option<Instant> {
        self.last_request
    }

    /// How long [`wait_if_needed`](Self::wait_if_needed) would sleep right now.
    pub fn time_until_ready(&self) -> Duration {
        match self.last_request {
            None => Duration::ZERO,
            Some(last) => self.min_interval.saturating_sub(last.elapsed()),
        }
    }

    /// Wait until a new request may start, then record its start time.
    ///
    /// The first call never waits. Returns the time spent sleeping.
    pub async fn wait_if_needed(&mut self) -> Duration {
        let wait = self.time_until_ready();
        if wait.is_zero() {
            trace!("Rate limit permission granted without waiting");
        } else {
            debug!(?wait, rpm = self.requests_per_minute.get(), "Pacing request");
            tokio::time::sleep(wait).await;
        }

        let now = Instant::now();
        self.last_request = Some(match self.last_request {
            Some(previous) if previous > now => previous,
            _ => now,
        });
        wait
    }
}
