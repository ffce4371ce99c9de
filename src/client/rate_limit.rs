//! Process-wide throttle for outbound ledger calls.
//!
//! One [`RateLimiter`] is shared (behind an `Arc`) by every ledger client in
//! the process, so concurrent expansions of different addresses still hit the
//! upstream API one at a time.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Spaces permitted calls at least `min_interval` apart.
///
/// Waiting is an async sleep, so a caller held back by the limiter never
/// blocks the runtime thread.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// The configured minimum spacing.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Suspend until the next call is permitted, then claim the slot.
    ///
    /// The lock is held across the sleep; callers that arrive meanwhile queue
    /// on it and are released one interval apart.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(
                    wait_secs = wait.as_secs_f64(),
                    "Rate limiting: waiting before next ledger call"
                );
                sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

// ============================================================================
// Tests
// ============================================================================
