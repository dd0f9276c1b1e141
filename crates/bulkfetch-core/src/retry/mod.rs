//! Retry policy for download attempts.
//!
//! The policy object only decides whether and how long to wait; the loop in
//! `run` drives attempts and the `Sleeper` performs the wait, so the whole
//! sequence can be exercised without real delays.

mod policy;
mod run;
mod sleep;

pub use policy::{Backoff, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryOutcome};
pub use sleep::{Sleeper, ThreadSleeper};
