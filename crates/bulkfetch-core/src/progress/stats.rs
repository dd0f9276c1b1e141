use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Run-wide counters. Each field is its own atomic.
#[derive(Debug)]
pub struct GlobalStats {
    total: usize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    streaming: AtomicUsize,
    rate_bytes: AtomicU64,
}

impl GlobalStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            streaming: AtomicUsize::new(0),
            rate_bytes: AtomicU64::new(0),
        }
    }

    /// Number of tasks in the run (N).
    pub fn total(&self) -> usize {
        self.total
    }

    /// Tasks that finished, successfully or not.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Tasks abandoned after exhausting their attempts (subset of `completed`).
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Acquire)
    }

    /// Attempts currently copying a response body.
    pub fn streaming(&self) -> usize {
        self.streaming.load(Ordering::Acquire)
    }

    /// Counts one finished task. Saturates at N; returns false if already there.
    pub fn mark_completed(&self) -> bool {
        let total = self.total;
        let res = self
            .completed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                (c < total).then_some(c + 1)
            });
        if res.is_err() {
            tracing::warn!(total, "completion counted past task total; ignored");
        }
        res.is_ok()
    }

    pub fn mark_failed(&self) {
        self.failed.fetch_add(1, Ordering::AcqRel);
    }

    /// Adds transferred bytes to the rate accumulator.
    pub fn add_bytes(&self, n: u64) {
        self.rate_bytes.fetch_add(n, Ordering::Relaxed);
    }

    /// Returns the bytes accumulated since the previous call and resets to zero
    /// in the same atomic step.
    pub fn take_bytes(&self) -> u64 {
        self.rate_bytes.swap(0, Ordering::AcqRel)
    }

    /// Marks one attempt as streaming until the guard drops.
    pub fn begin_streaming(&self) -> StreamingGuard<'_> {
        self.streaming.fetch_add(1, Ordering::AcqRel);
        StreamingGuard { stats: self }
    }
}

/// Decrements the streaming gauge when dropped.
pub struct StreamingGuard<'a> {
    stats: &'a GlobalStats,
}

impl Drop for StreamingGuard<'_> {
    fn drop(&mut self) {
        self.stats.streaming.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_bytes_resets() {
        let stats = GlobalStats::new(1);
        stats.add_bytes(100);
        stats.add_bytes(28);
        assert_eq!(stats.take_bytes(), 128);
        assert_eq!(stats.take_bytes(), 0);
        stats.add_bytes(5);
        assert_eq!(stats.take_bytes(), 5);
    }

    #[test]
    fn completed_never_exceeds_total() {
        let stats = GlobalStats::new(2);
        assert!(stats.mark_completed());
        assert!(stats.mark_completed());
        assert!(!stats.mark_completed());
        assert_eq!(stats.completed(), 2);
    }

    #[test]
    fn streaming_gauge_follows_guards() {
        let stats = GlobalStats::new(0);
        let a = stats.begin_streaming();
        let b = stats.begin_streaming();
        assert_eq!(stats.streaming(), 2);
        drop(a);
        assert_eq!(stats.streaming(), 1);
        drop(b);
        assert_eq!(stats.streaming(), 0);
    }
}
