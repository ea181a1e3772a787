//! Pacing for GitHub API calls.
//!
//! GitHub asks integrators to leave at least one second between requests and
//! may ask for longer through the `Retry-After` header. The migrator never
//! has more than one request in flight; after every call it derives a
//! [`RetryDirective`] from the response and waits it out before the next one.

mod info;

pub use info::RateLimitInfo;

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Spacing used when the response gives no better hint.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Maximum time to wait between two requests (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Parses a `Retry-After` value into the delay before the next request.
///
/// GitHub documents the value as a number of seconds, but unit-suffixed
/// values (`2s`, `1m 30s`) are accepted as well. Empty or unparseable values
/// fall back to [`MIN_DELAY`], and nothing shorter than it is ever returned.
#[must_use]
pub fn next_delay(retry_after: &str) -> Duration {
    let value = retry_after.trim();
    if value.is_empty() {
        return MIN_DELAY;
    }

    let delay = match value.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => match humantime::parse_duration(value) {
            Ok(delay) => delay,
            Err(e) => {
                debug!(retry_after = value, error = %e, "Unparseable Retry-After value");
                MIN_DELAY
            }
        },
    };

    delay.max(MIN_DELAY)
}

/// How long to pause before the next API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDirective {
    delay: Duration,
}

impl RetryDirective {
    /// Derives the pause from a response's `Retry-After` value and quota.
    ///
    /// The longer of the `Retry-After` delay and, when the quota is nearly
    /// exhausted, the time until it resets. Capped at one hour.
    #[must_use]
    pub fn for_response(retry_after: &str, quota: Option<&RateLimitInfo>, now: u64) -> Self {
        let mut delay = next_delay(retry_after);

        if let Some(quota) = quota.filter(|q| q.is_exhausted()) {
            let reset_wait = Duration::from_secs(quota.seconds_until_reset(now));
            if reset_wait > delay {
                debug!(
                    remaining = quota.remaining,
                    wait_secs = reset_wait.as_secs(),
                    "Rate limit low, waiting for reset"
                );
                delay = reset_wait;
            }
        }

        let max = Duration::from_secs(MAX_WAIT_SECS);
        if delay > max {
            warn!(
                wait_secs = delay.as_secs(),
                max_wait = MAX_WAIT_SECS,
                "Requested wait too long, capping wait time"
            );
            delay = max;
        }

        Self { delay }
    }

    /// The pause this directive asks for.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the directive's delay.
    pub async fn wait(self) {
        debug!(wait_ms = self.delay.as_millis() as u64, "Waiting between requests");
        tokio::time::sleep(self.delay).await;
    }
}

/// Current Unix time in seconds.
#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
