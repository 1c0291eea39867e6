use std::time::Duration;

/// Attempt budget and backoff schedule for structured LLM calls.
///
/// After failed attempt `n` (0-based) the client waits `base_delay * 2^(n+1)`,
/// so the default one-second base gives 2s, 4s, 8s, ... No wait follows the
/// final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_base_delay(max_attempts, Duration::from_secs(1))
    }

    /// Same attempt budget with no waiting between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::with_base_delay(max_attempts, Duration::ZERO)
    }

    pub fn with_base_delay(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_add(1)))
    }

    pub fn is_last(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
