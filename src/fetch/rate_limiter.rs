//! Fetch-rate limiting for sitemap requests.
//!
//! This module provides the [`RateLimiter`] struct which enforces a fixed
//! delay before every network fetch, so that resolving a large sitemap index
//! does not turn into a request burst against the origin server.
//!
//! # Overview
//!
//! The limiter holds a single interval. It is injected into the
//! [`Fetcher`](super::Fetcher) and shared with whoever needs to reconfigure it;
//! [`RateLimiter::set_interval`] takes effect for every later fetch, including
//! fetches an in-flight resolution has not issued yet. Local file reads are
//! never delayed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sitemapper_core::fetch::RateLimiter;
//!
//! # async fn example() {
//! let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));
//!
//! // Each network fetch waits for the interval first
//! limiter.acquire("https://example.com/sitemap.xml").await;
//!
//! // Reconfigure for all later fetches
//! limiter.set_interval(Duration::from_millis(100));
//! assert_eq!(limiter.interval(), Duration::from_millis(100));
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::constants::CUMULATIVE_DELAY_WARNING_THRESHOLD;

/// Fixed-interval limiter applied before each network fetch.
///
/// `RateLimiter` is `Send + Sync` and is normally shared through `Arc`.
#[derive(Debug)]
pub struct RateLimiter {
    /// Current interval in nanoseconds.
    interval_nanos: AtomicU64,

    /// Total delay applied so far, in nanoseconds.
    /// Used to warn once when excessive throttling occurs.
    cumulative_delay_nanos: AtomicU64,
}

impl RateLimiter {
    /// Creates a rate limiter with the given interval.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use sitemapper_core::fetch::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(Duration::from_millis(1000));
    /// assert!(!limiter.is_disabled());
    /// ```
    #[must_use]
    #[instrument(skip_all, fields(interval_ms = interval.as_millis()))]
    pub fn new(interval: Duration) -> Self {
        debug!("creating rate limiter");
        Self {
            interval_nanos: AtomicU64::new(duration_to_nanos(interval)),
            cumulative_delay_nanos: AtomicU64::new(0),
        }
    }

    /// Creates a rate limiter that applies no delays.
    ///
    /// Use this when `--interval-ms 0` is specified.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Replaces the interval for all subsequent fetches.
    #[instrument(skip(self), fields(interval_ms = interval.as_millis()))]
    pub fn set_interval(&self, interval: Duration) {
        self.interval_nanos
            .store(duration_to_nanos(interval), Ordering::SeqCst);
        debug!("fetch interval updated");
    }

    /// Returns the current interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_nanos.load(Ordering::SeqCst))
    }

    /// Returns whether no delay is currently applied.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.interval().is_zero()
    }

    /// Returns the total delay applied so far.
    #[must_use]
    pub fn cumulative_delay(&self) -> Duration {
        Duration::from_nanos(self.cumulative_delay_nanos.load(Ordering::SeqCst))
    }

    /// Waits for the current interval before a request to `url`.
    ///
    /// The interval is read at call time, so a concurrent
    /// [`set_interval`](Self::set_interval) applies to the next acquisition.
    #[instrument(skip(self))]
    pub async fn acquire(&self, url: &str) {
        let interval = self.interval();
        if interval.is_zero() {
            return;
        }

        let delay_nanos = duration_to_nanos(interval);
        let previous = self
            .cumulative_delay_nanos
            .fetch_add(delay_nanos, Ordering::SeqCst);
        let cumulative = Duration::from_nanos(previous.saturating_add(delay_nanos));

        debug!(
            delay_ms = interval.as_millis(),
            cumulative_ms = cumulative.as_millis(),
            "applying fetch interval"
        );

        // Warn only on the crossing, not on every later fetch
        if Duration::from_nanos(previous) < CUMULATIVE_DELAY_WARNING_THRESHOLD
            && cumulative >= CUMULATIVE_DELAY_WARNING_THRESHOLD
        {
            warn!(
                cumulative_delay_secs = cumulative.as_secs(),
                "sitemap traversal has spent a long time throttled - the index may be very large"
            );
        }

        tokio::time::sleep(interval).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(super::constants::DEFAULT_FETCH_INTERVAL)
    }
}

fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_rate_limiter_new_creates_with_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        assert_eq!(limiter.interval(), Duration::from_millis(500));
        assert!(!limiter.is_disabled());
    }

    #[test]
    fn test_rate_limiter_disabled_has_zero_interval() {
        let limiter = RateLimiter::disabled();
        assert_eq!(limiter.interval(), Duration::ZERO);
        assert!(limiter.is_disabled());
    }

    #[test]
    fn test_rate_limiter_default_is_one_second() {
        assert_eq!(RateLimiter::default().interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_rate_limiter_keeps_nanosecond_precision() {
        let limiter = RateLimiter::new(Duration::from_nanos(1));
        assert_eq!(limiter.interval(), Duration::from_nanos(1));
    }

    #[test]
    fn test_rate_limiter_reenabled_after_disable_counts_delay() {
        let limiter = RateLimiter::disabled();
        tokio_test::block_on(limiter.acquire("https://example.com/a.xml"));
        assert_eq!(limiter.cumulative_delay(), Duration::ZERO);

        limiter.set_interval(Duration::from_millis(1));
        tokio_test::block_on(limiter.acquire("https://example.com/b.xml"));
        assert_eq!(limiter.cumulative_delay(), Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_rate_limiter_disabled_no_delay() {
        tokio::time::pause();

        let limiter = RateLimiter::disabled();
        let start = Instant::now();

        limiter.acquire("https://example.com/1.xml").await;
        limiter.acquire("https://example.com/2.xml").await;

        assert!(start.elapsed() < Duration::from_millis(10));
        assert_eq!(limiter.cumulative_delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_rate_limiter_delays_every_fetch() {
        tokio::time::pause();

        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();

        // Unlike a per-domain limiter, even the first fetch waits
        limiter.acquire("https://example.com/sitemapindex.xml").await;
        assert!(start.elapsed() >= Duration::from_secs(1));

        limiter.acquire("https://other.com/sitemap.xml").await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_millis(2100));
        assert_eq!(limiter.cumulative_delay(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_rate_limiter_set_interval_applies_to_next_fetch() {
        tokio::time::pause();

        let limiter = RateLimiter::new(Duration::from_secs(5));
        limiter.set_interval(Duration::from_millis(200));

        let start = Instant::now();
        limiter.acquire("https://example.com/sitemap.xml").await;
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert!(start.elapsed() < Duration::from_secs(1));

        limiter.set_interval(Duration::ZERO);
        assert!(limiter.is_disabled());
    }
}
