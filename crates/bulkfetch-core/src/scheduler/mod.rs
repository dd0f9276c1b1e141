//! Bounded worker pool.
//!
//! Dispatches tasks in source order onto K reusable slots, one OS thread per
//! in-flight task, and waits for every worker before returning.

mod guard;
mod pool;
mod report;
mod run;

pub use pool::{SlotLease, SlotPool};
pub use report::{RunSummary, TaskReport, TaskResult};
pub use run::Scheduler;
