use std::time::Duration;

/// How the wait between failed attempts evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// `delay * 2^(attempt-1)`, capped at `max_delay`.
    Exponential { max_delay: Duration },
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; the task is finished.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Attempt budget and inter-attempt delay for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the next attempt (base delay for exponential backoff).
    pub delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(5, Duration::from_secs(5))
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
        }
    }

    /// Decide what to do after attempt number `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }

        match self.backoff {
            Backoff::Fixed => RetryDecision::RetryAfter(self.delay),
            Backoff::Exponential { max_delay } => {
                let exp = 1u32 << attempt.saturating_sub(1).min(8);
                let raw = self.delay.saturating_mul(exp);
                RetryDecision::RetryAfter(raw.min(max_delay))
            }
        }
    }
}
