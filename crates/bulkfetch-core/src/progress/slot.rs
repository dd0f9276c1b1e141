use humansize::{format_size, DECIMAL};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Progress of one attempt. Label and size never change after construction;
/// only the byte counter moves, and only upwards.
#[derive(Debug, Default)]
pub struct DownloadProgress {
    label: String,
    total: u64,
    downloaded: AtomicU64,
}

impl DownloadProgress {
    pub fn new(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            total,
            downloaded: AtomicU64::new(0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded.load(Ordering::Relaxed)
    }

    pub fn add_downloaded(&self, n: u64) {
        self.downloaded.fetch_add(n, Ordering::Relaxed);
    }
}

/// `"<url> (<size>)"`, size in SI units right-aligned to six columns.
pub fn progress_label(url: &str, size: u64) -> String {
    format!("{} ({:>6})", url, format_size(size, DECIMAL))
}

/// Fixed arena of per-slot progress records, indexed by slot id.
///
/// A slot holds an `Arc<DownloadProgress>` that is swapped whole at the start
/// of each attempt. Readers clone the `Arc`, so the label and byte count they
/// see always belong to the same attempt.
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<RwLock<Arc<DownloadProgress>>>,
}

impl SlotTable {
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count)
                .map(|_| RwLock::new(Arc::new(DownloadProgress::default())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Installs `progress` as the slot's current record, replacing the previous
    /// occupant. Returns the handle the attempt uses to count bytes.
    ///
    /// Panics if `slot` is out of range.
    pub fn publish(&self, slot: usize, progress: DownloadProgress) -> Arc<DownloadProgress> {
        let progress = Arc::new(progress);
        let mut current = self.slots[slot]
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&progress);
        progress
    }

    /// Current record of `slot`. Panics if `slot` is out of range.
    pub fn current(&self, slot: usize) -> Arc<DownloadProgress> {
        Arc::clone(
            &self.slots[slot]
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Current records of all slots in slot order.
    pub fn current_all(&self) -> Vec<Arc<DownloadProgress>> {
        (0..self.slots.len()).map(|i| self.current(i)).collect()
    }
}
