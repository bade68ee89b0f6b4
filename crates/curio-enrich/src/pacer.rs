//! Spacing between consecutive API requests.

use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Enforces a minimum delay between the end of one request and the start of
/// the next. The first request is never delayed.
///
/// Each finished request arms a fresh one-cell limiter and spends its cell,
/// so the next [`Self::ready`] waits a full period counted from that moment
/// however long the request itself took.
pub struct RequestPacer {
    quota: Option<Quota>,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl RequestPacer {
    /// A zero delay disables pacing.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            quota: Quota::with_period(delay),
            limiter: None,
        }
    }

    /// Record that a request just finished.
    pub fn finished(&mut self) {
        self.limiter = self.quota.map(|quota| {
            let limiter = RateLimiter::direct(quota);
            // A fresh limiter always has its single cell available.
            let _ = limiter.check();
            limiter
        });
    }

    /// Wait until the next request may start.
    pub async fn ready(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        if limiter.check().is_err() {
            tracing::trace!("pacing API request");
            limiter.until_ready().await;
        }
    }
}
