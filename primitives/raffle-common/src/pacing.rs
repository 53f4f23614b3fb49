//! Courtesy delay before hitting the platform.
//!
//! A short random pause lowers the chance of the account being throttled.
//! It is not a rate limiter: nothing is retried when throttling happens anyway.

use rand::Rng;
use std::time::Duration;

/// Random whole-second delay drawn from an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min_secs: u64,
    max_secs: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            min_secs: 1,
            max_secs: 5,
        }
    }
}

impl Pacing {
    /// Creates a pacing over `min_secs..=max_secs`. Bounds given in the wrong
    /// order are swapped.
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    /// No delay at all.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Picks the next delay.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }

    /// Sleeps for a freshly drawn delay and returns how long it slept.
    pub async fn pause(&self) -> Duration {
        let delay = self.next_delay();
        tracing::debug!(secs = delay.as_secs(), "Pausing before request");
        tokio::time::sleep(delay).await;
        delay
    }
}
