//! RAII guard that ends a task: frees its slot, then counts it as completed.

use std::sync::Arc;

use super::pool::SlotLease;
use crate::progress::ProgressState;

/// Held by a worker for the lifetime of one task. Runs its bookkeeping on drop,
/// so a task that panics or never starts still frees its slot and is counted
/// exactly once.
pub(super) struct TaskGuard {
    lease: Option<SlotLease>,
    state: Arc<ProgressState>,
    abandoned: bool,
}

impl TaskGuard {
    pub(super) fn new(lease: SlotLease, state: Arc<ProgressState>) -> Self {
        Self {
            lease: Some(lease),
            state,
            abandoned: true,
        }
    }

    pub(super) fn finish(&mut self, abandoned: bool) {
        self.abandoned = abandoned;
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        drop(self.lease.take());
        let stats = self.state.stats();
        if self.abandoned {
            stats.mark_failed();
        }
        stats.mark_completed();
    }
}
