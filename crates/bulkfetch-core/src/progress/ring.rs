use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// Fixed-capacity ring of the most recently committed file paths.
///
/// Writers claim position `next % capacity` with an atomic increment and then
/// store into that entry, overwriting the oldest path once the ring is full.
#[derive(Debug)]
pub struct RecentRing {
    next: AtomicUsize,
    entries: Vec<RwLock<Option<PathBuf>>>,
}

impl RecentRing {
    /// Capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            entries: (0..capacity.max(1)).map(|_| RwLock::new(None)).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of paths ever pushed (not bounded by capacity).
    pub fn pushed(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.pushed().min(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.pushed() == 0
    }

    pub fn push(&self, path: PathBuf) {
        let index = self.next.fetch_add(1, Ordering::AcqRel) % self.capacity();
        *self.entries[index]
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(path);
    }

    /// Entries by ring position, `None` for never-written positions.
    pub fn entries(&self) -> Vec<Option<PathBuf>> {
        self.entries
            .iter()
            .map(|e| e.read().unwrap_or_else(PoisonError::into_inner).clone())
            .collect()
    }

    /// Paths from oldest to newest.
    ///
    /// Best effort while writers are active: the write index and the entries
    /// are read separately, so a concurrent push can rotate the order by one.
    pub fn recent(&self) -> Vec<PathBuf> {
        let cap = self.capacity();
        let next = self.pushed();
        let start = if next > cap { next % cap } else { 0 };
        let entries = self.entries();
        (0..cap)
            .filter_map(|offset| entries[(start + offset) % cap].clone())
            .collect()
    }
}
