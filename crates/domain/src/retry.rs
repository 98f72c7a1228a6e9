/// How failed deliveries are retried.
///
/// Delays grow exponentially from `initial_backoff` and are capped at
/// `max_backoff`. All durations are in millis.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included
    pub max_attempts: u32,
    pub initial_backoff: i64,
    pub max_backoff: i64,
    pub multiplier: f64,
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32, initial_backoff: i64, max_backoff: i64) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            multiplier: 2.0,
        }
    }

    /// Delay to wait after the given failed attempt (1 based) before the
    /// next one.
    pub fn delay_for_attempt(&self, attempt: u32) -> i64 {
        if attempt == 0 {
            return 0;
        }
        let exponent = (attempt - 1).min(i32::MAX as u32) as i32;
        let delay = self.initial_backoff as f64 * self.multiplier.powi(exponent);
        delay.min(self.max_backoff as f64).max(0.0) as i64
    }

    pub fn should_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(3, 30 * 1000, 30 * 60 * 1000)
    }
}
