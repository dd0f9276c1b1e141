//! Retry loop: run an attempt until success or the policy says stop.

use std::fmt::Display;

use super::policy::{RetryDecision, RetryPolicy};
use super::sleep::Sleeper;

/// Final result of a retry sequence and how many attempts it took.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub attempts: u32,
    pub result: Result<T, E>,
}

/// Runs `attempt` (called with the 1-based attempt number) until it succeeds
/// or the policy stops. Failures are logged; there is no wait after the last one.
pub fn run_with_retry<T, E, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut attempt: F,
) -> RetryOutcome<T, E>
where
    E: Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let mut n = 1u32;
    loop {
        match attempt(n) {
            Ok(v) => {
                return RetryOutcome {
                    attempts: n,
                    result: Ok(v),
                }
            }
            Err(e) => {
                tracing::warn!(attempt = n, max_attempts = policy.max_attempts, "attempt failed: {}", e);
                match policy.decide(n) {
                    RetryDecision::NoRetry => {
                        return RetryOutcome {
                            attempts: n,
                            result: Err(e),
                        }
                    }
                    RetryDecision::RetryAfter(d) => {
                        sleeper.sleep(d);
                        n += 1;
                    }
                }
            }
        }
    }
}
