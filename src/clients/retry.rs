//! Bounded exponential backoff for rate-limited requests.

use std::time::Duration;

use serde::Deserialize;

/// How the transport retries a rate-limited request.
///
/// Only eligibility is decided elsewhere (status 429 or the rate-limit
/// marker in the error body); this policy owns the attempt count and the
/// delays between attempts.
///
/// ```rust
/// use std::time::Duration;
/// use shopify_tables::clients::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.delay_for(1, None), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(2, None), Duration::from_secs(2));
/// assert_eq!(policy.delay_for(9, None), Duration::from_secs(16));
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RetrySettings")]
pub struct RetryPolicy {
    /// Total attempts including the first one. `1` disables retries.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound for any single delay, including `Retry-After`.
    pub max_delay: Duration,
    /// Growth factor applied per attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(16),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Returns `true` if another attempt may follow attempt number `attempt`
    /// (1-based).
    #[must_use]
    pub const fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// A server supplied `Retry-After` replaces the computed delay. Either
    /// way the result never exceeds `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, retry_after: Option<f64>) -> Duration {
        let delay = retry_after.map_or_else(
            || {
                let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
                let factor = self.multiplier.max(1.0).powi(exponent);
                let secs = self.initial_delay.as_secs_f64() * factor;
                Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
            },
            |secs| Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay),
        );

        delay.min(self.max_delay)
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RetrySettings {
    max_attempts: u32,
    initial_delay_ms: u64,
    max_delay_ms: u64,
    multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_delay_ms: 1_000,
            max_delay_ms: 16_000,
            multiplier: policy.multiplier,
        }
    }
}

impl From<RetrySettings> for RetryPolicy {
    fn from(settings: RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            multiplier: settings.multiplier,
        }
    }
}
