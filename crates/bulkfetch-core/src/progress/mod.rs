//! Shared progress state written by workers and read by the dashboard sampler.
//!
//! Each part is synchronized on its own: one lock per slot, atomics for the
//! counters, one lock per ring entry. Nothing locks the whole record set, so a
//! sample taken across parts is a best-effort view rather than a transaction.

mod ring;
mod slot;
mod stats;

pub use ring::RecentRing;
pub use slot::{progress_label, DownloadProgress, SlotTable};
pub use stats::{GlobalStats, StreamingGuard};

/// Everything a run shares between the scheduler, the workers and the sampler.
/// Built once per run and handed around behind an `Arc`.
#[derive(Debug)]
pub struct ProgressState {
    slots: SlotTable,
    stats: GlobalStats,
    recent: RecentRing,
}

impl ProgressState {
    /// `slot_count` worker slots, a ring of `recent_capacity` entries, `total_tasks` = N.
    pub fn new(slot_count: usize, recent_capacity: usize, total_tasks: usize) -> Self {
        Self {
            slots: SlotTable::new(slot_count),
            stats: GlobalStats::new(total_tasks),
            recent: RecentRing::new(recent_capacity),
        }
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    pub fn recent(&self) -> &RecentRing {
        &self.recent
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
