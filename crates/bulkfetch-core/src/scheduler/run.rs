//! Dispatch loop, per-task retry sequence, and the completion barrier.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use super::guard::TaskGuard;
use super::pool::SlotPool;
use super::report::{RunSummary, TaskReport, TaskResult};
use crate::downloader::{AttemptOutcome, Downloader};
use crate::retry::{run_with_retry, RetryPolicy, Sleeper, ThreadSleeper};
use crate::task::DownloadTask;

/// Runs a task list with at most K concurrent workers, K being the slot count
/// of the downloader's progress state.
pub struct Scheduler {
    downloader: Arc<Downloader>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Scheduler {
    pub fn new(downloader: Arc<Downloader>, policy: RetryPolicy) -> Self {
        Self {
            downloader,
            policy,
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    /// Replaces the inter-attempt sleeper (tests record delays instead of sleeping).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Dispatches every task in order, blocking while all slots are busy, then
    /// joins all workers. Each task bumps the completed counter exactly once.
    pub fn run(&self, tasks: Vec<DownloadTask>) -> RunSummary {
        let state = Arc::clone(self.downloader.state());
        let pool = Arc::new(SlotPool::new(state.slot_count()));
        let (report_tx, report_rx) = mpsc::channel::<TaskReport>();
        let mut workers = Vec::with_capacity(tasks.len());
        let mut lost: Vec<String> = Vec::new();

        tracing::info!(
            tasks = tasks.len(),
            slots = pool.size(),
            max_attempts = self.policy.max_attempts,
            "dispatch started"
        );

        for task in tasks {
            let lease = pool.acquire();
            let slot = lease.slot();
            let guard = TaskGuard::new(lease, Arc::clone(&state));
            let url = task.url().to_string();

            let downloader = Arc::clone(&self.downloader);
            let sleeper = Arc::clone(&self.sleeper);
            let policy = self.policy;
            let tx = report_tx.clone();

            let spawned = thread::Builder::new()
                .name(format!("bulkfetch-slot-{}", slot))
                .spawn(move || {
                    let mut guard = guard;
                    let report = run_task(&downloader, &policy, sleeper.as_ref(), &task, slot);
                    guard.finish(report.result == TaskResult::Abandoned);
                    let _ = tx.send(report);
                });

            match spawned {
                Ok(handle) => workers.push((url, handle)),
                Err(e) => {
                    // The closure (and its guard) is dropped here: slot freed, task counted.
                    tracing::error!(%url, "failed to spawn worker: {}", e);
                    lost.push(url);
                }
            }
        }
        drop(report_tx);

        for (url, handle) in workers {
            if handle.join().is_err() {
                tracing::error!(%url, "worker panicked");
                lost.push(url);
            }
        }

        let mut summary = RunSummary {
            reports: report_rx.try_iter().collect(),
        };
        summary.reports.extend(lost.into_iter().map(|url| TaskReport {
            url,
            slot: 0,
            attempts: 0,
            result: TaskResult::Abandoned,
        }));

        tracing::info!(
            committed = summary.committed(),
            skipped = summary.skipped(),
            abandoned = summary.abandoned().len(),
            "all tasks finished"
        );
        summary
    }
}

/// Retry sequence for one task on one slot.
fn run_task(
    downloader: &Downloader,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    task: &DownloadTask,
    slot: usize,
) -> TaskReport {
    let outcome = run_with_retry(policy, sleeper, |attempt| {
        tracing::debug!(url = task.url(), slot, attempt, "attempt started");
        downloader.attempt(task, slot).map_err(|e| {
            tracing::debug!(url = task.url(), slot, attempt, kind = e.kind(), "attempt error");
            e
        })
    });

    let result = match outcome.result {
        Ok(AttemptOutcome::Committed(path)) => TaskResult::Committed(path),
        Ok(AttemptOutcome::AlreadyPresent(_)) => TaskResult::Skipped,
        Err(e) => {
            tracing::error!(
                url = task.url(),
                attempts = outcome.attempts,
                "giving up: {}",
                e
            );
            TaskResult::Abandoned
        }
    };

    TaskReport {
        url: task.url().to_string(),
        slot,
        attempts: outcome.attempts,
        result,
    }
}
