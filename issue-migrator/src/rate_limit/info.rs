//! Rate limit information.

use http::HeaderMap;

/// Minimum remaining requests before proactively waiting for a reset.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Quota state reported by GitHub's `X-RateLimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Reads the quota headers, if all of them are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Some(Self {
            remaining: header_number(headers, "x-ratelimit-remaining")?,
            reset: header_number(headers, "x-ratelimit-reset")?,
            limit: header_number(headers, "x-ratelimit-limit")?,
        })
    }

    /// Returns true when so few requests remain that the next call should
    /// wait for the window to reset.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining < MIN_REMAINING_THRESHOLD
    }

    /// Seconds until the window resets, or zero if it already has.
    #[must_use]
    pub fn seconds_until_reset(&self, now: u64) -> u64 {
        self.reset.saturating_sub(now)
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
